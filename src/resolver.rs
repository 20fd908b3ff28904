//! The resolver facade: eager construction and translation queries.
//!
//! A [`MappingResolver`] is built once, synchronously, before any query is served:
//! locate the build for the target version, fetch and decompress the artifact,
//! decode it into the table, and pin the configured namespace roles. Afterwards
//! every operation is a pure read over the immutable table, so the resolver can be
//! shared freely across reader threads.
//!
//! The resolver is an explicitly constructed value: pass it (by reference or in
//! an `Arc`) to every component that performs reflective dispatch; there is no
//! process-wide instance.

use tracing::debug;

use crate::{
    mapping::{tiny, MappingTable, MemberKind},
    remote::MappingRepo,
    Error, Result,
};

/// Namespace roles used by the convenience query surface.
///
/// The *source* namespace is the one callers write their queries in (the stable,
/// human-assigned names); the *reference* namespace is the one the running binary
/// actually uses, i.e. the namespace member translations are answered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    source_namespace: String,
    reference_namespace: String,
}

impl ResolverOptions {
    /// Options with explicit source and reference namespace labels.
    pub fn new(source_namespace: impl Into<String>, reference_namespace: impl Into<String>) -> Self {
        ResolverOptions {
            source_namespace: source_namespace.into(),
            reference_namespace: reference_namespace.into(),
        }
    }

    /// The namespace queries are written in.
    #[must_use]
    pub fn source_namespace(&self) -> &str {
        &self.source_namespace
    }

    /// The namespace member translations are answered in.
    #[must_use]
    pub fn reference_namespace(&self) -> &str {
        &self.reference_namespace
    }
}

impl Default for ResolverOptions {
    /// `named` → `intermediary`, the published artifacts' conventional roles.
    fn default() -> Self {
        ResolverOptions::new("named", "intermediary")
    }
}

/// Translates class, method, and field names between the namespaces of one
/// resolved mapping build.
///
/// # Examples
///
/// ```rust,no_run
/// use mapscope::MappingResolver;
///
/// let resolver = MappingResolver::resolve("1.20.4")?;
/// let class = resolver.translate_class(
///     "net/minecraft/client/MinecraftClient", "named", "intermediary")?;
/// let method = resolver.translate_method(
///     "net/minecraft/client/MinecraftClient", "getInstance", None, "named")?;
/// # Ok::<(), mapscope::Error>(())
/// ```
pub struct MappingResolver {
    table: MappingTable,
    options: ResolverOptions,
    source: usize,
    reference: usize,
}

impl MappingResolver {
    /// Resolve mappings for `target_version` from the default repository with the
    /// default namespace roles.
    ///
    /// This is the one-time, eager initialization path: it blocks the calling
    /// thread for the full duration of the network round-trips and the decode.
    ///
    /// # Errors
    /// Any locate/fetch/decode failure is terminal for the resolver:
    /// [`Error::NoMatchingBuild`], [`Error::Download`], [`Error::Decompression`],
    /// [`Error::Malformed`], or [`Error::UnknownNamespace`] if the artifact does
    /// not declare the configured namespaces.
    pub fn resolve(target_version: &str) -> Result<MappingResolver> {
        Self::resolve_with(&MappingRepo::new(), ResolverOptions::default(), target_version)
    }

    /// Resolve mappings from a custom repository and/or with custom namespace roles.
    ///
    /// # Errors
    /// Same contract as [`Self::resolve`].
    pub fn resolve_with(repo: &MappingRepo, options: ResolverOptions, target_version: &str) -> Result<MappingResolver> {
        let build = repo.latest_build(target_version)?;
        debug!(build = %build, "resolved mapping build");

        let artifact = repo.fetch(&build)?;
        let table = tiny::decode(artifact.reader()?)?;
        Self::from_table(table, options)
    }

    /// Wrap an already-decoded table.
    ///
    /// For embedders that obtain the artifact through their own channel, and for
    /// tests; no network access is performed.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNamespace`] if the table does not declare the
    /// configured source or reference namespace.
    pub fn from_table(table: MappingTable, options: ResolverOptions) -> Result<MappingResolver> {
        let source = table.namespaces().ordinal(options.source_namespace())?;
        let reference = table.namespaces().ordinal(options.reference_namespace())?;
        Ok(MappingResolver {
            table,
            options,
            source,
            reference,
        })
    }

    /// The underlying mapping table.
    #[must_use]
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// The namespace index declared by the resolved artifact.
    #[must_use]
    pub fn namespaces(&self) -> &crate::mapping::Namespaces {
        self.table.namespaces()
    }

    /// The configured namespace roles.
    #[must_use]
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Translate a class name from one namespace into another.
    ///
    /// ## Arguments
    /// * 'name' - The class name (slash-separated path) under `from_ns`
    /// * 'from_ns' / 'to_ns' - Namespace labels declared by the table
    ///
    /// # Errors
    /// [`Error::UnknownNamespace`] for undeclared labels,
    /// [`Error::UnknownClass`] if no class carries `name` under `from_ns`,
    /// never a default or empty name.
    pub fn translate_class(&self, name: &str, from_ns: &str, to_ns: &str) -> Result<&str> {
        let from = self.table.namespaces().ordinal(from_ns)?;
        let to = self.table.namespaces().ordinal(to_ns)?;

        let class = self
            .table
            .class(from, name)
            .ok_or_else(|| Error::UnknownClass(name.to_string()))?;
        class.name(to).ok_or_else(|| Error::UnknownNamespace(to_ns.to_string()))
    }

    /// Translate a method name into the reference namespace.
    ///
    /// Resolves the owning class by `class_name` under `from_ns`, then the method
    /// by `(method_name, descriptor)` under the same namespace. The descriptor is
    /// matched verbatim, not re-expressed between namespaces, so supply it
    /// in the namespace the table stores (the first header namespace), or `None`
    /// when overload disambiguation is not needed.
    ///
    /// # Errors
    /// [`Error::UnknownNamespace`], [`Error::UnknownClass`], or
    /// [`Error::UnknownMember`] if no (name, descriptor) pair matches.
    pub fn translate_method(
        &self,
        class_name: &str,
        method_name: &str,
        descriptor: Option<&str>,
        from_ns: &str,
    ) -> Result<&str> {
        let from = self.table.namespaces().ordinal(from_ns)?;
        self.member_in_reference(MemberKind::Method, from, class_name, method_name, descriptor)
    }

    /// Translate a field name into the reference namespace. Same contract as
    /// [`Self::translate_method`], field variant.
    pub fn translate_field(
        &self,
        class_name: &str,
        field_name: &str,
        descriptor: Option<&str>,
        from_ns: &str,
    ) -> Result<&str> {
        let from = self.table.namespaces().ordinal(from_ns)?;
        self.member_in_reference(MemberKind::Field, from, class_name, field_name, descriptor)
    }

    /// Translate a class from the source namespace into the reference namespace,
    /// i.e. the name the running binary knows the class by.
    ///
    /// # Errors
    /// [`Error::UnknownClass`] if the source namespace has no such class.
    pub fn runtime_class(&self, name: &str) -> Result<&str> {
        let class = self
            .table
            .class(self.source, name)
            .ok_or_else(|| Error::UnknownClass(name.to_string()))?;
        class
            .name(self.reference)
            .ok_or_else(|| Error::UnknownNamespace(self.options.reference_namespace().to_string()))
    }

    /// Translate a method from the source namespace into the reference namespace.
    pub fn runtime_method(&self, class_name: &str, method_name: &str, descriptor: Option<&str>) -> Result<&str> {
        self.member_in_reference(MemberKind::Method, self.source, class_name, method_name, descriptor)
    }

    /// Translate a field from the source namespace into the reference namespace.
    pub fn runtime_field(&self, class_name: &str, field_name: &str, descriptor: Option<&str>) -> Result<&str> {
        self.member_in_reference(MemberKind::Field, self.source, class_name, field_name, descriptor)
    }

    fn member_in_reference(
        &self,
        kind: MemberKind,
        from: usize,
        class_name: &str,
        member_name: &str,
        descriptor: Option<&str>,
    ) -> Result<&str> {
        let class = self
            .table
            .class(from, class_name)
            .ok_or_else(|| Error::UnknownClass(class_name.to_string()))?;

        let member = match kind {
            MemberKind::Method => class.method(from, member_name, descriptor),
            MemberKind::Field => class.field(from, member_name, descriptor),
        }
        .ok_or_else(|| Error::UnknownMember {
            class: class_name.to_string(),
            name: member_name.to_string(),
        })?;

        member
            .name(self.reference)
            .ok_or_else(|| Error::UnknownNamespace(self.options.reference_namespace().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "tiny\t2\t0\tofficial\tintermediary\tnamed\n\
                           c\ta\tnet/minecraft/class_310\tnet/minecraft/client/MinecraftClient\n\
                           \tm\t()Lnet/minecraft/class_310;\tb\tmethod_1551\tgetInstance\n\
                           \tm\t(I)V\tc\tmethod_9001\tresize\n\
                           \tm\t(Ljava/lang/String;)V\td\tmethod_9002\tresize\n\
                           \tf\tI\te\tfield_1724\titemUseCooldown\n";

    fn resolver() -> MappingResolver {
        let table = tiny::decode(FIXTURE.as_bytes()).unwrap();
        MappingResolver::from_table(table, ResolverOptions::default()).unwrap()
    }

    #[test]
    fn translates_classes_between_namespaces() {
        let resolver = resolver();
        assert_eq!(
            resolver
                .translate_class("net/minecraft/client/MinecraftClient", "named", "official")
                .unwrap(),
            "a"
        );
        assert_eq!(
            resolver.translate_class("a", "official", "named").unwrap(),
            "net/minecraft/client/MinecraftClient"
        );
    }

    #[test]
    fn members_answer_in_the_reference_namespace() {
        let resolver = resolver();
        assert_eq!(
            resolver
                .translate_method("net/minecraft/client/MinecraftClient", "getInstance", None, "named")
                .unwrap(),
            "method_1551"
        );
        assert_eq!(
            resolver
                .translate_field("net/minecraft/client/MinecraftClient", "itemUseCooldown", Some("I"), "named")
                .unwrap(),
            "field_1724"
        );
    }

    #[test]
    fn overloads_resolve_independently() {
        let resolver = resolver();
        let class = "net/minecraft/client/MinecraftClient";
        let by_int = resolver.translate_method(class, "resize", Some("(I)V"), "named").unwrap();
        let by_string = resolver
            .translate_method(class, "resize", Some("(Ljava/lang/String;)V"), "named")
            .unwrap();
        assert_eq!(by_int, "method_9001");
        assert_eq!(by_string, "method_9002");
        assert_ne!(by_int, by_string);
    }

    #[test]
    fn unknown_lookups_are_errors() {
        let resolver = resolver();
        assert!(matches!(
            resolver.translate_class("com/does/not/Exist", "named", "intermediary"),
            Err(Error::UnknownClass(_))
        ));
        assert!(matches!(
            resolver.translate_class("a", "hashed", "named"),
            Err(Error::UnknownNamespace(_))
        ));
        assert!(matches!(
            resolver.translate_method("net/minecraft/client/MinecraftClient", "missing", None, "named"),
            Err(Error::UnknownMember { .. })
        ));
        assert!(matches!(
            resolver.translate_method(
                "net/minecraft/client/MinecraftClient",
                "resize",
                Some("(J)V"),
                "named"
            ),
            Err(Error::UnknownMember { .. })
        ));
    }

    #[test]
    fn convenience_wrappers_use_configured_roles() {
        let resolver = resolver();
        assert_eq!(
            resolver.runtime_class("net/minecraft/client/MinecraftClient").unwrap(),
            "net/minecraft/class_310"
        );
        assert_eq!(
            resolver
                .runtime_method("net/minecraft/client/MinecraftClient", "resize", Some("(I)V"))
                .unwrap(),
            "method_9001"
        );
        assert_eq!(
            resolver
                .runtime_field("net/minecraft/client/MinecraftClient", "itemUseCooldown", None)
                .unwrap(),
            "field_1724"
        );
    }

    #[test]
    fn from_table_rejects_undeclared_roles() {
        let table = tiny::decode(FIXTURE.as_bytes()).unwrap();
        let result = MappingResolver::from_table(table, ResolverOptions::new("named", "hashed"));
        assert!(matches!(result, Err(Error::UnknownNamespace(label)) if label == "hashed"));
    }
}
