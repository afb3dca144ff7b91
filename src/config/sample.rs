//! Sample configuration generation
//!
//! Renders declared option groups as a commented TOML document that users
//! can copy and edit.

use crate::config::types::{OptionGroup, OptionSpec};
use std::fmt::Write;

const SECRET_PLACEHOLDER: &str = "\"<secret>\"";

/// Merge groups that share a name, keeping the order groups were first seen
pub fn merge_groups(groups: &[OptionGroup]) -> Vec<OptionGroup> {
    let mut merged: Vec<OptionGroup> = Vec::new();
    for group in groups {
        match merged.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => {
                for opt in &group.options {
                    if !existing.options.iter().any(|o| o.name == opt.name) {
                        existing.options.push(opt.clone());
                    }
                }
            }
            None => merged.push(group.clone()),
        }
    }
    merged
}

/// Render a commented TOML sample for the given option groups
pub fn generate_sample(groups: &[OptionGroup]) -> String {
    let mut out = String::new();
    for (index, group) in merge_groups(groups).iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", group.name);
        for opt in &group.options {
            out.push('\n');
            render_option(&mut out, opt);
        }
    }
    out
}

fn render_option(out: &mut String, opt: &OptionSpec) {
    if let Some(help) = &opt.help {
        for line in help.lines() {
            let _ = writeln!(out, "# {}", line.trim_end());
        }
    }
    let _ = writeln!(out, "# Type: {}", opt.kind);
    match &opt.default {
        Some(_) if opt.secret => {
            let _ = writeln!(out, "#{} = {}", opt.name, SECRET_PLACEHOLDER);
        }
        Some(default) => {
            let _ = writeln!(out, "#{} = {}", opt.name, default);
        }
        None => {
            let _ = writeln!(out, "#{} =", opt.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_renders_help_type_and_default() {
        let groups = vec![OptionGroup::new(
            "compute",
            vec![
                OptionSpec::integer("build_timeout")
                    .with_default(300)
                    .with_help("Seconds to wait for a build"),
                OptionSpec::string("image_ref"),
            ],
        )];

        let sample = generate_sample(&groups);
        assert_eq!(
            sample,
            "[compute]\n\n# Seconds to wait for a build\n# Type: integer\n#build_timeout = 300\n\n# Type: string\n#image_ref =\n"
        );
    }

    #[test]
    fn test_sample_masks_secret_defaults() {
        let groups = vec![OptionGroup::new(
            "identity",
            vec![OptionSpec::string("admin_password")
                .with_default("hunter2")
                .secret()],
        )];

        let sample = generate_sample(&groups);
        assert!(sample.contains("#admin_password = \"<secret>\""));
        assert!(!sample.contains("hunter2"));
    }

    #[test]
    fn test_sample_quotes_string_defaults() {
        let groups = vec![OptionGroup::new(
            "compute",
            vec![OptionSpec::string("flavor").with_default("m1.tiny")],
        )];

        assert!(generate_sample(&groups).contains("#flavor = \"m1.tiny\""));
    }

    #[test]
    fn test_groups_with_same_name_are_merged_in_first_seen_order() {
        let groups = vec![
            OptionGroup::new("network", vec![OptionSpec::boolean("ipv6")]),
            OptionGroup::new("compute", vec![OptionSpec::string("image_ref")]),
            OptionGroup::new(
                "network",
                vec![OptionSpec::boolean("ipv6"), OptionSpec::string("public_id")],
            ),
        ];

        let merged = merge_groups(&groups);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "network");
        let names: Vec<_> = merged[0].options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["ipv6", "public_id"]);
        assert_eq!(merged[1].name, "compute");

        let sample = generate_sample(&groups);
        assert_eq!(sample.matches("[network]").count(), 1);
        assert!(sample.find("[network]").unwrap() < sample.find("[compute]").unwrap());
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(generate_sample(&[]), "");
    }
}
