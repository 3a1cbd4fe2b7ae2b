pub mod ask_request;
pub mod ask_route;
pub mod ask_stream_route;
