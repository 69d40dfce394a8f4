use crate::config::{DocsConfig, DEFAULT_API_VERSION, DEFAULT_MOUNT_PATH};
use crate::registry::KeyStrategy;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Route Swagger - Generate Swagger documents from route manifests
#[derive(Parser, Debug)]
#[command(name = "route-swagger")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Route manifest file, or a directory of manifests
    #[arg(value_name = "MANIFEST_PATH")]
    pub manifest_path: PathBuf,

    /// Emit the API declaration of this resource instead of the resource listing
    #[arg(short = 'r', long = "resource", value_name = "NAME")]
    pub resource: Option<String>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Path the documentation endpoint is mounted at
    #[arg(long = "mount-path", default_value = DEFAULT_MOUNT_PATH)]
    pub mount_path: String,

    /// Base path advertised in documents (defaults to the base URL)
    #[arg(long = "base-path")]
    pub base_path: Option<String>,

    /// Base URL of the simulated documentation request
    #[arg(long = "base-url", default_value = "http://localhost")]
    pub base_url: String,

    /// API version reported in documents and substituted for {version}
    #[arg(long = "api-version", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Render route notes from Markdown to HTML
    #[arg(long = "markdown")]
    pub markdown: bool,

    /// Leave the documentation endpoint out of the resource listing
    #[arg(long = "hide-documentation-path")]
    pub hide_documentation_path: bool,

    /// Drop the .{format} suffix from paths
    #[arg(long = "hide-format")]
    pub hide_format: bool,

    /// Append response field documentation to operation notes
    #[arg(long = "display-object-fields")]
    pub display_object_fields: bool,

    /// How routes are grouped into resources
    #[arg(long = "key-strategy", value_enum, default_value = "namespace")]
    pub key_strategy: KeyStrategyArg,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Resource grouping options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum KeyStrategyArg {
    /// Group by the route's namespace
    Namespace,
    /// Group by the first path segment
    #[value(name = "first-segment")]
    FirstSegment,
}

impl From<KeyStrategyArg> for KeyStrategy {
    fn from(arg: KeyStrategyArg) -> Self {
        match arg {
            KeyStrategyArg::Namespace => KeyStrategy::Namespace,
            KeyStrategyArg::FirstSegment => KeyStrategy::FirstPathSegment,
        }
    }
}

impl CliArgs {
    /// Documentation configuration described by the flags
    pub fn docs_config(&self) -> DocsConfig {
        let mut config = DocsConfig::new()
            .mount_path(self.mount_path.clone())
            .api_version(self.api_version.clone())
            .markdown(self.markdown)
            .hide_documentation_path(self.hide_documentation_path)
            .hide_format(self.hide_format)
            .display_object_fields(self.display_object_fields)
            .key_strategy(self.key_strategy.into());
        if let Some(base_path) = &self.base_path {
            config = config.base_path(base_path.clone());
        }
        config
    }

    /// Request path of the document to emit
    pub fn request_path(&self) -> String {
        match &self.resource {
            Some(name) => format!("{}/{}", self.mount_path, name),
            None => self.mount_path.clone(),
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.manifest_path.exists() {
        anyhow::bail!(
            "Manifest path does not exist: {}",
            args.manifest_path.display()
        );
    }

    if let Some(name) = &args.resource {
        if name.is_empty() || name.contains('/') {
            anyhow::bail!("Invalid resource name: {:?}", name);
        }
    }

    info!("Manifest path: {}", args.manifest_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    match &args.resource {
        Some(name) => info!("Document: API declaration of '{}'", name),
        None => info!("Document: resource listing"),
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::endpoint::{DocRequest, DocsEndpoint};
    use crate::parser::{Manifest, ManifestParser};
    use crate::scanner::ManifestScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting Swagger document generation...");

    // Step 1: Find manifests
    info!("Scanning for route manifests...");
    let scan_result = ManifestScanner::new(args.manifest_path.clone()).scan()?;

    info!("Found {} manifest files", scan_result.manifest_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }

    if scan_result.manifest_files.is_empty() {
        anyhow::bail!("No route manifests found at {}", args.manifest_path.display());
    }

    // Step 2: Load manifests
    info!("Loading route manifests...");
    let manifests: Vec<Manifest> = ManifestParser::parse_files(&scan_result.manifest_files)
        .into_iter()
        .filter_map(|r| match r {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                debug!("Skipping manifest: {}", e);
                None
            }
        })
        .collect();

    info!("Successfully loaded {} manifests", manifests.len());

    if manifests.is_empty() {
        anyhow::bail!("No route manifests could be loaded");
    }

    // Step 3: Mount each manifest as a sub-API, then the documentation routes
    let endpoint = DocsEndpoint::new(args.docs_config())?;
    let mut route_count = 0;
    for manifest in manifests {
        debug!("Mounting {} routes from {}", manifest.routes.len(), manifest.path.display());
        route_count += manifest.routes.len();
        endpoint.registry().mount(manifest.routes);
    }
    endpoint.mount_self();
    info!("Documentation endpoint mounted at {}", endpoint.config().mount_path);

    let snapshot = endpoint.registry().snapshot();
    info!("Registry holds {} resources", snapshot.len());

    // Step 4: Answer the documentation request
    let request = DocRequest::get(args.request_path(), args.base_url.clone());
    info!("Building document for {}", request.path);
    let response = endpoint
        .handle(&request)?
        .with_context(|| format!("No document is served at {}", request.path))?;

    // Step 5: Serialize
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&response.body)?,
        OutputFormat::Yaml => serialize_yaml(&response.body)?,
    };

    // Step 6: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Manifests scanned: {}", scan_result.manifest_files.len());
    info!("  - Routes mounted: {}", route_count);
    info!("  - Resources: {}", snapshot.len());

    Ok(())
}
