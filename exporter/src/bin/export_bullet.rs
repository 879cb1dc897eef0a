//! CLI tool for exporting a scene snapshot to a Bullet physics document
//!
//! Usage: cargo run --bin export_bullet <scene.json> <out.bullet> [options]

use exporter::config::{with_bullet_extension, AssetConfig, ExportConfig, QuaternionOrder};
use exporter::export::export_to_file;
use exporter::io::Scene;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use tracing::error;

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Options {
    scene: PathBuf,
    output: PathBuf,
    asset_root: Option<PathBuf>,
    config: ExportConfig,
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <scene.json> <out.bullet> [options]");
    eprintln!("\nExports rigid bodies and constraints of a scene to a .bullet JSON file.");
    eprintln!("\nOptions:");
    eprintln!("  --hulls             Write convex hull vertices for CONVEX_HULL bodies");
    eprintln!("  --meshes            Write triangulated meshes for MESH bodies");
    eprintln!("  --pretty            Indent the JSON output");
    eprintln!("  --scalar-last       Write quaternions as [x, y, z, w] instead of [w, x, y, z]");
    eprintln!("  --asset-root <DIR>  Directory OBJ mesh paths are resolved against");
    eprintln!("                      (default: the scene file's directory)");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut asset_root = None;
    let mut config = ExportConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--hulls" => config = config.with_hulls(true),
            "--meshes" => config = config.with_meshes(true),
            "--pretty" => config = config.with_pretty(true),
            "--scalar-last" => {
                config = config.with_quaternion_order(QuaternionOrder::ScalarLast)
            }
            "--asset-root" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| "--asset-root needs a directory".to_string())?;
                asset_root = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{flag}'")),
            path => positional.push(PathBuf::from(path)),
        }
    }

    let [scene, output]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| "Expected a scene file and an output file".to_string())?;

    Ok(Options {
        scene,
        output,
        asset_root,
        config,
    })
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let asset_root = match &options.asset_root {
        Some(root) => root.clone(),
        None => options
            .scene
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    let scene = Scene::load_from_file(&options.scene)?;
    let graph = scene.instantiate(&AssetConfig::new(asset_root))?;

    let output = with_bullet_extension(&options.output);
    let summary = export_to_file(&graph, &output, &options.config)?;

    println!("Exported {} to {}", summary, output.display());
    Ok(())
}

fn main() {
    exporter::init_logging();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("export_bullet");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("ERROR: {message}\n");
            usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        error!(scene = ?options.scene, "Export failed: {}", e);
        eprintln!("ERROR: Failed to export '{}': {}", options.scene.display(), e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_only() {
        let options = parse_args(&args(&["scene.json", "out"])).unwrap();
        assert_eq!(options.scene, PathBuf::from("scene.json"));
        assert_eq!(options.output, PathBuf::from("out"));
        assert_eq!(options.asset_root, None);
        assert_eq!(options.config, ExportConfig::default());
        assert_eq!(options.config.quaternion_order, QuaternionOrder::ScalarFirst);
    }

    #[test]
    fn test_all_flags() {
        let options = parse_args(&args(&[
            "--hulls",
            "scene.json",
            "--meshes",
            "--pretty",
            "--scalar-last",
            "--asset-root",
            "assets",
            "out.bullet",
        ]))
        .unwrap();
        assert!(options.config.export_hulls);
        assert!(options.config.export_meshes);
        assert!(options.config.pretty);
        assert_eq!(options.config.quaternion_order, QuaternionOrder::ScalarLast);
        assert_eq!(options.asset_root, Some(PathBuf::from("assets")));
        assert_eq!(options.output, PathBuf::from("out.bullet"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["scene.json"])).is_err());
        assert!(parse_args(&args(&["a", "b", "c"])).is_err());
        assert!(parse_args(&args(&["a", "b", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a", "b", "--asset-root"])).is_err());
    }
}
