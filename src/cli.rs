/// terminal menu and the one-shot analysis of a file given on the command line
pub mod cli_main;
