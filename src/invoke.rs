//! Capability boundary for host-specific reflective dispatch.
//!
//! Invocation mechanics (loading a class, boxing arguments, calling through the
//! host runtime's reflection) are inherently host-specific and do not belong in
//! this crate. The embedding layer implements [`Invoker`] against its runtime;
//! every name and descriptor it receives has already been translated into the
//! binary's runtime namespace by the [`crate::MappingResolver`], keeping
//! translation and invocation strictly separate.
//!
//! Passing an invoker explicitly (rather than reaching for ambient state) keeps
//! the dispatch path testable: a recording stub stands in for the host runtime.

/// Dispatches operations against the running binary using already-translated
/// names.
///
/// Implementations own whatever handles the host runtime requires (an attached
/// environment, a class-loader reference). All names are in the binary's runtime
/// namespace and all descriptors in the namespace the mapping table stores them
/// in; no translation happens behind this trait.
pub trait Invoker {
    /// Handle to a value of the host runtime.
    type Value;

    /// Host-specific dispatch failure.
    type Error;

    /// Invoke a static method on `class` and return its result.
    fn call_static(
        &mut self,
        class: &str,
        method: &str,
        descriptor: &str,
        args: &[Self::Value],
    ) -> std::result::Result<Self::Value, Self::Error>;

    /// Invoke an instance method on `receiver` and return its result.
    fn call_instance(
        &mut self,
        receiver: &Self::Value,
        method: &str,
        descriptor: &str,
        args: &[Self::Value],
    ) -> std::result::Result<Self::Value, Self::Error>;

    /// Read a static field from `class`.
    fn get_static_field(
        &mut self,
        class: &str,
        field: &str,
        descriptor: &str,
    ) -> std::result::Result<Self::Value, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every dispatch instead of performing one.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Invoker for Recorder {
        type Value = String;
        type Error = ();

        fn call_static(
            &mut self,
            class: &str,
            method: &str,
            descriptor: &str,
            _args: &[String],
        ) -> Result<String, ()> {
            self.calls.push(format!("static {class}.{method}{descriptor}"));
            Ok(String::new())
        }

        fn call_instance(
            &mut self,
            _receiver: &String,
            method: &str,
            descriptor: &str,
            _args: &[String],
        ) -> Result<String, ()> {
            self.calls.push(format!("instance {method}{descriptor}"));
            Ok(String::new())
        }

        fn get_static_field(&mut self, class: &str, field: &str, descriptor: &str) -> Result<String, ()> {
            self.calls.push(format!("field {class}.{field}:{descriptor}"));
            Ok(String::new())
        }
    }

    #[test]
    fn translated_names_flow_through_unchanged() {
        let mut invoker = Recorder::default();
        invoker
            .call_static("net/minecraft/class_310", "method_1551", "()Lnet/minecraft/class_310;", &[])
            .unwrap();
        invoker
            .get_static_field("net/minecraft/class_310", "field_1724", "I")
            .unwrap();
        assert_eq!(
            invoker.calls,
            vec![
                "static net/minecraft/class_310.method_1551()Lnet/minecraft/class_310;",
                "field net/minecraft/class_310.field_1724:I",
            ]
        );
    }
}
