mod authenticated;
mod client_ip;
