use crate::cli::args::Cli;
use crate::config::Config;
use crate::output::format::Style;

pub struct RunContext {
    pub style: Style,
    pub verbose: bool,
}

impl RunContext {
    /// Combine CLI flags, config and the `NO_COLOR` environment variable.
    pub fn from_args(cli: &Cli, config: &Config) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::resolve(cli.no_color, cli.verbose, config, no_color_env)
    }

    fn resolve(no_color: bool, verbose: bool, config: &Config, no_color_env: bool) -> Self {
        let color = !(no_color || config.no_color || no_color_env);
        RunContext {
            style: Style { color },
            verbose: verbose || config.verbose,
        }
    }
}
