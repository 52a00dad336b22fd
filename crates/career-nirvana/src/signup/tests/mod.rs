mod common;
mod sessions;
mod wizard;
