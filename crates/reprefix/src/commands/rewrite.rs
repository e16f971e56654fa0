//! The `rewrite` subcommand.
//!
//! Pipeline: validate configuration, mirror the input tree into the
//! output directory, classify every Swift file, build the rename
//! layers (discovered base + included reports + manual tokens), then
//! rewrite each file and rename matching headers.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::debug;

use reprefix_rewrite::{RenameLayer, Report, compose};
use reprefix_syntax::{Classification, classify_file, parse_source};

use crate::cli::RewriteArgs;
use crate::fsops;

pub fn run(args: RewriteArgs) -> Result<()> {
    // Configuration errors surface before any file is touched.
    let manual: Vec<(String, String)> = args
        .rewrites
        .iter()
        .map(|raw| parse_rewrite_token(raw))
        .collect::<Result<_>>()?;

    let input = args.directory.as_path();
    let output = args.output_directory.as_path();
    if !input.is_dir() {
        bail!("input directory not found: {}", input.display());
    }
    if !output.is_dir() {
        bail!("output directory not found: {}", output.display());
    }
    let same_tree = fs::canonicalize(input)? == fs::canonicalize(output)?;

    let reports = load_reports(&args)?;

    if !args.in_place {
        println!("cleaning files in {}", output.display());
        fsops::clean_dir(output)?;
    }
    if !same_tree {
        println!("copying files over to {}", output.display());
        fsops::copy_tree(input, output)?;
    }

    let paths = fsops::find_files(input, "swift")?;
    let sources: Vec<(&Path, String)> = paths
        .iter()
        .map(|path| {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.as_path(), source))
        })
        .collect::<Result<_>>()?;
    debug!(files = sources.len(), "discovered swift sources");

    // Classification always runs so the outgoing report reflects this
    // tree even when the base layer is suppressed.
    let per_file: Vec<Classification> = sources
        .par_iter()
        .map(|(path, source)| {
            let tree =
                parse_source(source).with_context(|| format!("parsing {}", path.display()))?;
            Ok(classify_file(&tree, source))
        })
        .collect::<Result<_>>()?;
    let classification = per_file
        .into_iter()
        .fold(
            Classification::seeded(args.exclude.iter().cloned()),
            Classification::merge,
        )
        .without_excluded();

    let mut layers = Vec::new();
    if !args.reports_only {
        layers.push(RenameLayer::from_classification(
            &args.prefix,
            &classification,
            args.product_names.iter().cloned(),
        ));
    }
    layers.extend(reports.iter().map(RenameLayer::from_report));
    layers.extend(manual.iter().map(|(prefix, token)| RenameLayer::manual(prefix, token)));

    sources.par_iter().try_for_each(|(path, source)| {
        let rewritten =
            compose(&layers, source).with_context(|| format!("rewriting {}", path.display()))?;
        let relative = path
            .strip_prefix(input)
            .expect("discovered files live under the input directory");
        let target = output.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&target, rewritten)
            .with_context(|| format!("writing {}", target.display()))?;
        debug!(path = %target.display(), "rewrote");
        Ok::<(), anyhow::Error>(())
    })?;

    rename_headers(&args, &reports, input, output)?;

    if let Some(report_path) = &args.report {
        let report = Report::from_classification(
            &args.prefix,
            &classification,
            args.product_names.clone(),
        );
        fs::write(report_path, report.to_json()?)
            .with_context(|| format!("writing report {}", report_path.display()))?;
        println!("report available at {}", report_path.display());
    }

    Ok(())
}

fn load_reports(args: &RewriteArgs) -> Result<Vec<Report>> {
    let mut reports = Vec::with_capacity(args.include.len());
    for path in &args.include {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading report {}", path.display()))?;
        let report = Report::from_json(&raw)
            .with_context(|| format!("decoding report {}", path.display()))?;
        reports.push(report);
    }
    Ok(reports)
}

/// Rename header copies whose stem matches a renamed module. The main
/// prefix is prepended to the file name, mirroring the module rename
/// applied to imports.
fn rename_headers(
    args: &RewriteArgs,
    reports: &[Report],
    input: &Path,
    output: &Path,
) -> Result<()> {
    let mut module_names: BTreeSet<String> = args.product_names.iter().cloned().collect();
    for report in reports {
        module_names.extend(report.products.iter().flatten().cloned());
    }
    if module_names.is_empty() {
        return Ok(());
    }

    for header in fsops::find_files(input, "h")? {
        let matches = header
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| module_names.contains(stem));
        if !matches {
            continue;
        }
        let relative = header
            .strip_prefix(input)
            .expect("discovered files live under the input directory");
        let target = output.join(relative);
        let Some(name) = target.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let renamed = target.with_file_name(format!("{}{name}", args.prefix));
        fs::rename(&target, &renamed).with_context(|| {
            format!("renaming {} to {}", target.display(), renamed.display())
        })?;
        debug!(header = %renamed.display(), "renamed header");
    }
    Ok(())
}

fn parse_rewrite_token(raw: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        [prefix, token] if !prefix.is_empty() && !token.is_empty() => {
            Ok(((*prefix).to_string(), (*token).to_string()))
        }
        _ => bail!("rename token must be in the form of `prefix:token`, got `{raw}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_rewrite_token;

    #[test]
    fn parses_rewrite_token() {
        let (prefix, token) = parse_rewrite_token("NS:Widget").unwrap();
        assert_eq!(prefix, "NS");
        assert_eq!(token, "Widget");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(parse_rewrite_token("NSWidget").is_err());
        assert!(parse_rewrite_token("NS:Widget:extra").is_err());
        assert!(parse_rewrite_token(":Widget").is_err());
        assert!(parse_rewrite_token("NS:").is_err());
    }
}
