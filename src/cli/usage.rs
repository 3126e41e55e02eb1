//! Usage text

/// Full help text printed by `help`, `--help`, `-h`, no arguments, and after
/// an unknown command
pub const USAGE: &str = "\
microfolio - Static portfolio generator for creatives

Usage:
  microfolio new <project-name>     Create a new portfolio
  microfolio dev                    Start development server
  microfolio build                  Build site for production
  microfolio preview                Preview built site locally
  microfolio optimize-images        Optimize project images
  microfolio clean-images           Remove generated images
  microfolio help                   Show this help

Options:
  -v, --verbose                     Print debug output
      --config <PATH>               Use this config file [env: MICROFOLIO_CONFIG]
      --package-manager <PM>        Package manager to run [env: MICROFOLIO_PACKAGE_MANAGER]
  -V, --version                     Print version

Options for new:
      --template <URL|PATH>         Template to clone [env: MICROFOLIO_TEMPLATE]
      --no-install                  Skip dependency installation

Examples:
  microfolio new my-portfolio       # Creates new project in ./my-portfolio
  cd my-portfolio && microfolio dev # Starts development server
  microfolio build && microfolio preview # Build and preview production site
";

/// Usage line for `new`
pub const NEW_USAGE: &str = "Usage: microfolio new <project-name>";

/// Printed after a project has been scaffolded
pub fn next_steps(name: &str) -> String {
    format!("Next steps:\n  cd {}\n  microfolio dev\n", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_lists_every_command() {
        for cmd in [
            "new <project-name>",
            "dev",
            "build",
            "preview",
            "optimize-images",
            "clean-images",
            "help",
        ] {
            assert!(
                USAGE.contains(&format!("microfolio {}", cmd)),
                "usage is missing {}",
                cmd
            );
        }
    }

    #[test]
    fn next_steps_names_the_project() {
        let text = next_steps("my-portfolio");
        assert!(text.contains("cd my-portfolio"));
        assert!(text.contains("microfolio dev"));
    }
}
