mod config;
mod objects;
