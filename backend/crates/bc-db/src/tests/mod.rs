mod connection;
mod repositories;
