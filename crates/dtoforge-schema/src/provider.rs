use crate::descriptor::SourceTypeDescriptor;

///
/// SchemaProvider
///
/// Input boundary: hands the generation pipeline a read-only, ordered
/// snapshot of source type descriptors. Implementations own all raw marker
/// interpretation; downstream code only ever sees typed configuration.
///

pub trait SchemaProvider {
    /// All candidate types in stable declaration order.
    fn read_types(&self) -> Vec<SourceTypeDescriptor>;

    /// A single type by its crate-relative path.
    fn read_type(&self, path: &str) -> Option<SourceTypeDescriptor> {
        self.read_types().into_iter().find(|d| d.path() == path)
    }
}

impl SchemaProvider for Vec<SourceTypeDescriptor> {
    fn read_types(&self) -> Vec<SourceTypeDescriptor> {
        self.clone()
    }
}
