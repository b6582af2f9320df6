use std::path::Path;

pub(super) const ALPHA_DISTRIBUTION_COMMAND: &str = "alpha-distribution";

const ALPHA_DISTRIBUTION_ALIASES: [&str; 2] =
    ["extract-alpha-distribution", "extract_alpha_distribution"];

/// Maps an aliased executable name (for example a symlink named
/// `extract-alpha-distribution`) onto the subcommand it stands for.
pub(super) fn command_alias_from_program_name(program_name: &str) -> Option<&'static str> {
    let executable_name = Path::new(program_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program_name);
    let normalized = executable_name
        .strip_suffix(".exe")
        .unwrap_or(executable_name);

    if ALPHA_DISTRIBUTION_ALIASES.contains(&normalized) {
        return Some(ALPHA_DISTRIBUTION_COMMAND);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{ALPHA_DISTRIBUTION_COMMAND, command_alias_from_program_name};

    #[test]
    fn primary_binary_name_has_no_alias() {
        assert_eq!(command_alias_from_program_name("wavepacket-rs"), None);
        assert_eq!(
            command_alias_from_program_name("/usr/local/bin/wavepacket-rs"),
            None
        );
    }

    #[test]
    fn extractor_aliases_map_to_the_subcommand() {
        for name in [
            "extract-alpha-distribution",
            "/opt/bin/extract_alpha_distribution",
            "extract-alpha-distribution.exe",
        ] {
            assert_eq!(
                command_alias_from_program_name(name),
                Some(ALPHA_DISTRIBUTION_COMMAND)
            );
        }
    }
}
