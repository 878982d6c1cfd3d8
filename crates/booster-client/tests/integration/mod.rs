mod dashboard_flow;
mod http_api;
mod push_channel;
