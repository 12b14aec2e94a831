pub mod gateway_client;
