pub mod scheduler;
pub mod scrape;
pub mod shutdown;
pub mod testserver;
