pub mod backends;
pub mod proxy_client;
