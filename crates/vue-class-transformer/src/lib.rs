//! Options API to class component transformation.
//!
//! This crate rewrites the default exported options object of a Vue 2
//! component script into a class declaration that uses the decorators of
//! `vue-property-decorator`. It handles:
//! - `props` in every declaration form, as `@Prop` fields
//! - `data`, as typed public fields with their initial values
//! - `methods` and lifecycle hooks, copied as methods
//! - `computed`, as getters and setters
//! - `watch`, as `@Watch` methods
//! - `mixins` and `components`, in the extends clause and `@Component` options
//!
//! # Example
//!
//! ```
//! use vue_class_transformer::{transform, TransformOptions};
//!
//! let script = r#"
//! export default {
//!     name: "counter",
//!     props: { step: Number },
//!     data() {
//!         return { count: 0 };
//!     },
//!     methods: {
//!         increment() {
//!             this.count += this.step;
//!         },
//!     },
//! };
//! "#;
//!
//! let result = transform(script, TransformOptions::default()).unwrap();
//! assert!(result.code.contains("class Counter extends Vue"));
//! assert!(result.code.contains("export default Counter;"));
//! println!("{}", result.code);
//! ```

mod ast;
mod builder;
mod computed;
mod data;
mod error;
mod methods;
mod options;
mod props;
mod registry;
mod transform;
mod types;
mod watch;

pub use builder::{
    class_name_from, ClassBuilder, ComponentSummary, ImportName, Member, MemberKind,
    DECORATOR_MODULE, FALLBACK_CLASS_NAME,
};
pub use error::TransformError;
pub use options::{convert_options, OptionKey, LIFECYCLE_HOOKS};
pub use transform::{
    convert_module, emit_module, parse_script, transform, Script, TransformOptions,
    TransformResult,
};
pub use types::{type_annotation, DeclaredType};
pub use watch::handler_name;
