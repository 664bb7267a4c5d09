mod clear;
mod export;
mod fetch;
