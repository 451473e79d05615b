
mod ignores;
mod options;
mod overrides;
mod print_config;
mod reporter;
mod stdin;
