mod flowise_client;

pub use flowise_client::FlowiseClient;
