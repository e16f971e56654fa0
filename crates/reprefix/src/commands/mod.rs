//! CLI command implementations - one module per subcommand.

pub mod rewrite;
