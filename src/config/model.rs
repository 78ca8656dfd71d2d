// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, e.g.:
///
/// ```toml
/// clean_public = true
///
/// [paths.source]
/// css = "source/css"
///
/// [paths.public]
/// css = "public/css"
///
/// [serve]
/// port = 3000
/// ```
///
/// All sections are optional and default to the conventional
/// `source/` / `public/` layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Whether the output directory is purged before a full build.
    /// Passed through to the pattern engine's build operation.
    #[serde(default = "default_true")]
    pub clean_public: bool,

    /// Directory roles for the source and output trees.
    #[serde(default)]
    pub paths: PathsSection,

    /// External tool command templates.
    #[serde(default)]
    pub tools: ToolsSection,

    /// Stylesheet pipeline settings.
    #[serde(default)]
    pub styles: StylesSection,

    /// Script bundling settings.
    #[serde(default)]
    pub scripts: ScriptsSection,

    /// Style-guide export settings.
    #[serde(default)]
    pub export: ExportSection,

    /// Dev server settings.
    #[serde(default)]
    pub serve: ServeSection,

    /// File watching settings.
    #[serde(default)]
    pub watch: WatchSection,

    /// Pattern engine settings.
    #[serde(default)]
    pub engine: EngineSection,
}

fn default_true() -> bool {
    true
}

/// `[paths]` section: role-to-directory mapping for both trees.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PathsSection {
    #[serde(default)]
    pub source: SourcePaths,
    #[serde(default)]
    pub public: PublicPaths,
}

/// `[paths.source]`: where each class of input lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePaths {
    #[serde(default = "d_source_root")]
    pub root: String,
    #[serde(default = "d_source_css")]
    pub css: String,
    #[serde(default = "d_source_js")]
    pub js: String,
    #[serde(default = "d_source_images")]
    pub images: String,
    #[serde(default = "d_source_fonts")]
    pub fonts: String,
    #[serde(default = "d_source_icons")]
    pub icons: String,
    #[serde(default = "d_source_patterns")]
    pub patterns: String,
    #[serde(default = "d_source_data")]
    pub data: String,
    #[serde(default = "d_source_meta")]
    pub meta: String,
    #[serde(default = "d_source_annotations")]
    pub annotations: String,
    #[serde(default = "d_source_styleguide")]
    pub styleguide: String,
}

fn d_source_root() -> String {
    "source".into()
}
fn d_source_css() -> String {
    "source/css".into()
}
fn d_source_js() -> String {
    "source/js".into()
}
fn d_source_images() -> String {
    "source/images".into()
}
fn d_source_fonts() -> String {
    "source/fonts".into()
}
fn d_source_icons() -> String {
    "source/icons".into()
}
fn d_source_patterns() -> String {
    "source/_patterns".into()
}
fn d_source_data() -> String {
    "source/_data".into()
}
fn d_source_meta() -> String {
    "source/_meta".into()
}
fn d_source_annotations() -> String {
    "source/_annotations".into()
}
fn d_source_styleguide() -> String {
    "source/styleguide".into()
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            root: d_source_root(),
            css: d_source_css(),
            js: d_source_js(),
            images: d_source_images(),
            fonts: d_source_fonts(),
            icons: d_source_icons(),
            patterns: d_source_patterns(),
            data: d_source_data(),
            meta: d_source_meta(),
            annotations: d_source_annotations(),
            styleguide: d_source_styleguide(),
        }
    }
}

/// `[paths.public]`: where each class of output lands.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicPaths {
    #[serde(default = "d_public_root")]
    pub root: String,
    #[serde(default = "d_public_css")]
    pub css: String,
    #[serde(default = "d_public_js")]
    pub js: String,
    #[serde(default = "d_public_images")]
    pub images: String,
    #[serde(default = "d_public_fonts")]
    pub fonts: String,
    #[serde(default = "d_public_patterns")]
    pub patterns: String,
    #[serde(default = "d_public_styleguide")]
    pub styleguide: String,
}

fn d_public_root() -> String {
    "public".into()
}
fn d_public_css() -> String {
    "public/css".into()
}
fn d_public_js() -> String {
    "public/js".into()
}
fn d_public_images() -> String {
    "public/images".into()
}
fn d_public_fonts() -> String {
    "public/fonts".into()
}
fn d_public_patterns() -> String {
    "public/patterns".into()
}
fn d_public_styleguide() -> String {
    "public/styleguide".into()
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self {
            root: d_public_root(),
            css: d_public_css(),
            js: d_public_js(),
            images: d_public_images(),
            fonts: d_public_fonts(),
            patterns: d_public_patterns(),
            styleguide: d_public_styleguide(),
        }
    }
}

/// `[tools]` section: command templates for the external collaborators.
///
/// Templates are run through the platform shell with `{src}`, `{dest}` and
/// `{file}` placeholders substituted first. The compilers themselves are
/// external; patternpipe only orders and invokes them.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    /// Stylesheet compiler, given the source and output css directories.
    #[serde(default = "d_tool_sass")]
    pub sass: String,

    /// Vendor prefixer, given the compiled stylesheet as `{file}`.
    #[serde(default = "d_tool_autoprefixer")]
    pub autoprefixer: String,

    /// Sprite compiler, given the icon directory and the output directory.
    #[serde(default = "d_tool_svg_sprite")]
    pub svg_sprite: String,

    /// Application bundle minifier, given the script directory and the
    /// output bundle file.
    #[serde(default = "d_tool_bundle")]
    pub bundle: String,

    /// Vendor bundle minifier, given the vendor directory and the output
    /// directory.
    #[serde(default = "d_tool_vendor_bundle")]
    pub vendor_bundle: String,
}

fn d_tool_sass() -> String {
    "sass {src}:{dest}".into()
}
fn d_tool_autoprefixer() -> String {
    "npx postcss {file} --use autoprefixer --replace".into()
}
fn d_tool_svg_sprite() -> String {
    "svg-sprite --symbol --dest {dest} {src}/*.svg".into()
}
fn d_tool_bundle() -> String {
    "esbuild {src}/*.js --bundle --minify --outfile={dest}".into()
}
fn d_tool_vendor_bundle() -> String {
    "esbuild {src}/**/*.js --minify --outdir={dest}".into()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            sass: d_tool_sass(),
            autoprefixer: d_tool_autoprefixer(),
            svg_sprite: d_tool_svg_sprite(),
            bundle: d_tool_bundle(),
            vendor_bundle: d_tool_vendor_bundle(),
        }
    }
}

/// `[styles]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StylesSection {
    /// The compiled stylesheet the prefixer runs on, relative to the public
    /// css directory.
    #[serde(default = "d_style_entry")]
    pub entry: String,

    /// Variable extraction rules: stylesheet variables whose names start with
    /// `prefix` are written as JSON data files into the pattern source tree.
    #[serde(default)]
    pub extract: Vec<ExtractRule>,
}

fn d_style_entry() -> String {
    "style.css".into()
}

impl Default for StylesSection {
    fn default() -> Self {
        Self {
            entry: d_style_entry(),
            extract: Vec::new(),
        }
    }
}

/// One `[[styles.extract]]` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRule {
    /// Stylesheet file to read variables from.
    pub src: String,
    /// JSON file to write the extracted variables to.
    pub dest: String,
    /// Variable name prefix to match, e.g. `$color-brand-`.
    pub prefix: String,
}

/// `[scripts]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptsSection {
    /// File name of the production bundle inside the public js directory.
    #[serde(default = "d_bundle_name")]
    pub bundle: String,
}

fn d_bundle_name() -> String {
    "production.min.js".into()
}

impl Default for ScriptsSection {
    fn default() -> Self {
        Self {
            bundle: d_bundle_name(),
        }
    }
}

/// `[export]` section: the sibling style-guide project to publish into.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSection {
    /// Target project directory.
    #[serde(default = "d_export_target")]
    pub target: String,

    /// Begin marker of pattern-library-specific markup regions that are
    /// removed from exported HTML fragments.
    #[serde(default = "d_strip_begin")]
    pub strip_begin: String,

    /// End marker, see `strip_begin`.
    #[serde(default = "d_strip_end")]
    pub strip_end: String,
}

fn d_export_target() -> String {
    "../style-guide".into()
}
fn d_strip_begin() -> String {
    "<!--patternlab:start-->".into()
}
fn d_strip_end() -> String {
    "<!--patternlab:end-->".into()
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            target: d_export_target(),
            strip_begin: d_strip_begin(),
            strip_end: d_strip_end(),
        }
    }
}

/// `[serve]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeSection {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_port")]
    pub port: u16,
}

fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_port() -> u16 {
    3000
}

impl Default for ServeSection {
    fn default() -> Self {
        Self {
            host: d_host(),
            port: d_port(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// How long a file must stay quiet after a change burst before its rule
    /// fires. Avoids rebuilding on partially-written files.
    #[serde(default = "d_settle_ms")]
    pub settle_ms: u64,
}

fn d_settle_ms() -> u64 {
    300
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            settle_ms: d_settle_ms(),
        }
    }
}

/// `[engine]` section: the external pattern-library engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    /// Engine CLI command.
    #[serde(default = "d_engine_command")]
    pub command: String,

    /// Template file extensions the engine recognizes; the catch-all watch
    /// rule derives one glob per entry.
    #[serde(default = "d_template_extensions")]
    pub template_extensions: Vec<String>,
}

fn d_engine_command() -> String {
    "patternlab".into()
}
fn d_template_extensions() -> Vec<String> {
    vec![".mustache".into()]
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            command: d_engine_command(),
            template_extensions: d_template_extensions(),
        }
    }
}
