mod errors;
mod samples;
mod settings;
mod tables;
mod variables;
