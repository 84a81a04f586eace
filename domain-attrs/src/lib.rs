//! `#[derive(ErrorKind)]` for the error kinds of the tutor's crates.

mod structures;

use proc_macro::TokenStream;
use quote::quote;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Implements `domain_error::ErrorKind` for a unit struct or a struct with named fields.
///
/// The report is described by the `error` attribute:
///
/// ```
/// use domain_attrs::ErrorKind;
/// use domain_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not a known function", name),
///     labels = ["called here"],
///     help = "only `sqrt` and `log` restrict the domain",
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
/// ```
///
/// - `message` (required): the headline of the report.
/// - `labels`: something iterable, yielding the text attached to each span of the error in order.
///   Spans past the last label are not highlighted; without `labels`, only the first span is.
/// - `help`: a hint shown under the report.
///
/// The fields of the struct are in scope in every expression.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let body = quote!(#target);
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            #body
        }
    }.into()
}
