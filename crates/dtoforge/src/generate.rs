use dtoforge_core::{
    diagnostic::Diagnostic,
    model::ProjectionModel,
    resolve::resolve_all,
};
use dtoforge_schema::{descriptor::SourceTypeDescriptor, provider::SchemaProvider};
use dtoforge_synth::{Artifact, synthesize_mappers, synthesize_type};
use std::collections::{BTreeMap, BTreeSet};

///
/// Generator
///
/// The full pipeline over one descriptor snapshot: resolve every type in
/// stable input order, synthesize artifacts for the models that carry no
/// error diagnostics, and aggregate per-namespace mapper bundles. One type's
/// failure never blocks another's output.
///

#[derive(Debug)]
pub struct Generator {
    descriptors: Vec<SourceTypeDescriptor>,
}

impl Generator {
    #[must_use]
    pub const fn new(descriptors: Vec<SourceTypeDescriptor>) -> Self {
        Self { descriptors }
    }

    #[must_use]
    pub fn from_provider(provider: &impl SchemaProvider) -> Self {
        Self::new(provider.read_types())
    }

    #[must_use]
    pub fn run(&self) -> GenerationOutput {
        let resolutions = resolve_all(&self.descriptors);

        let mut types = Vec::with_capacity(resolutions.len());
        let mut generatable: Vec<ProjectionModel> = Vec::new();

        for resolution in resolutions {
            let source_path = resolution.model.source_path.clone();
            tracing::debug!(
                source = %source_path,
                target = %resolution.model.target_path(),
                diagnostics = resolution.diagnostics.len(),
                "resolved projection"
            );

            let artifact = if resolution.is_generatable() {
                generatable.push(resolution.model.clone());
                Some(synthesize_type(&resolution.model))
            } else {
                tracing::debug!(source = %source_path, "excluded from synthesis");
                None
            };

            types.push(TypeOutput {
                source_path,
                artifact,
                diagnostics: resolution.diagnostics,
            });
        }

        let mappers = synthesize_mappers(generatable.iter());

        GenerationOutput { types, mappers }
    }
}

///
/// TypeOutput
///

#[derive(Debug)]
pub struct TypeOutput {
    pub source_path: String,

    /// `None` when error diagnostics excluded the type from synthesis.
    pub artifact: Option<Artifact>,

    pub diagnostics: Vec<Diagnostic>,
}

///
/// GenerationOutput
///

#[derive(Debug)]
pub struct GenerationOutput {
    /// Per-type results in stable input order.
    pub types: Vec<TypeOutput>,

    /// One `Mapper.g` per target namespace, namespace order.
    pub mappers: Vec<Artifact>,
}

impl GenerationOutput {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.types.iter().flat_map(|t| t.diagnostics.iter())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }

    /// Every artifact in output order: type artifacts first, then the
    /// per-namespace mapper bundles.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.types
            .iter()
            .filter_map(|t| t.artifact.as_ref())
            .chain(self.mappers.iter())
    }

    /// Push every artifact and diagnostic across the host boundary.
    pub fn write_to<H: GenerationHost>(&self, host: &mut H) {
        for artifact in self.artifacts() {
            host.write_artifact(artifact);
        }
        for diagnostic in self.diagnostics() {
            host.report(diagnostic);
        }
    }

    /// Rendered source per target namespace: de-duplicated imports, type
    /// artifacts in output order, then the namespace's mapper bundle.
    #[must_use]
    pub fn render_namespaces(&self) -> BTreeMap<String, String> {
        let mut namespaces: BTreeMap<String, (BTreeSet<String>, Vec<String>)> = BTreeMap::new();

        for artifact in self.types.iter().filter_map(|t| t.artifact.as_ref()) {
            let entry = namespaces.entry(artifact.namespace.clone()).or_default();
            entry.0.extend(artifact.imports.iter().cloned());
            entry.1.push(artifact.render());
        }
        for artifact in &self.mappers {
            let entry = namespaces.entry(artifact.namespace.clone()).or_default();
            entry.1.push(artifact.render());
        }

        namespaces
            .into_iter()
            .map(|(namespace, (imports, bodies))| {
                let mut source = String::new();
                for import in imports {
                    source.push_str(&format!("use {import};\n"));
                }
                for body in bodies {
                    source.push_str(&body);
                    source.push_str("\n\n");
                }

                (namespace, source)
            })
            .collect()
    }

    /// Every namespace wrapped into a nested module tree, ready for a build
    /// script to write as a single file.
    #[must_use]
    pub fn render_module_tree(&self) -> String {
        let mut root = ModuleNode::default();
        for (namespace, body) in self.render_namespaces() {
            root.insert(&namespace, body);
        }

        root.render()
    }

    /// Diagnostics serialized for host-side reporting.
    #[must_use]
    pub fn diagnostics_json(&self) -> String {
        let all: Vec<&Diagnostic> = self.diagnostics().collect();

        serde_json::to_string_pretty(&all).unwrap_or_else(|_| "[]".to_string())
    }
}

///
/// GenerationHost
///
/// The output boundary: rendering, writing, and diagnostic presentation are
/// entirely the host's concern.
///

pub trait GenerationHost {
    fn write_artifact(&mut self, artifact: &Artifact);
    fn report(&mut self, diagnostic: &Diagnostic);
}

///
/// ModuleNode
///

#[derive(Debug, Default)]
struct ModuleNode {
    body: String,
    children: BTreeMap<String, ModuleNode>,
}

impl ModuleNode {
    fn insert(&mut self, namespace: &str, body: String) {
        let mut node = self;
        for segment in namespace.split("::") {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.body = body;
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.body);
        for (name, child) in &self.children {
            out.push_str(&format!("pub mod {name} {{\n{}}}\n", child.render()));
        }

        out
    }
}

/// One-call entry for build scripts: the rendered module tree plus every
/// diagnostic.
#[must_use]
pub fn generate_to_string(
    descriptors: Vec<SourceTypeDescriptor>,
) -> (String, Vec<Diagnostic>) {
    let output = Generator::new(descriptors).run();
    let rendered = output.render_module_tree();
    let diagnostics = output.diagnostics().cloned().collect();

    (rendered, diagnostics)
}
