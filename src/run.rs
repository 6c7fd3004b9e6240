mod cli;

pub(crate) use cli::{as_cli, split_file_flag};
