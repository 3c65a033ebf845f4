use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Ident, ItemFn, LitStr};

const USAGE: &str = "rxlite_macro::test only accepts: #[rxlite_macro::test], \
                     #[rxlite_macro::test(local)] or #[rxlite_macro::test(shared)]";

/// Marks a test function.
///
/// Sync functions become plain `#[test]`s. Async functions run on a tokio
/// runtime: `local` (the default) uses a current-thread runtime, `shared`
/// a multi-thread runtime so values may arrive from worker threads.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);
  let is_async = input.sig.asyncness.is_some();
  let raw_args = proc_macro2::TokenStream::from(attr);

  if !is_async {
    if !raw_args.is_empty() {
      return TokenStream::from(
        syn::Error::new(
          raw_args.span(),
          "rxlite_macro::test flavor args are only supported for async tests",
        )
        .to_compile_error(),
      );
    }
    return TokenStream::from(quote! {
      #[test]
      #input
    });
  }

  let flavor = if raw_args.is_empty() {
    "local".to_string()
  } else if let Ok(ident) = syn::parse2::<Ident>(raw_args.clone()) {
    ident.to_string()
  } else if let Ok(lit) = syn::parse2::<LitStr>(raw_args.clone()) {
    lit.value()
  } else {
    return TokenStream::from(syn::Error::new(raw_args.span(), USAGE).to_compile_error());
  };

  let tokio_args = match flavor.as_str() {
    "local" => quote!(flavor = "current_thread"),
    "shared" => quote!(flavor = "multi_thread", worker_threads = 2),
    _ => return TokenStream::from(syn::Error::new(raw_args.span(), USAGE).to_compile_error()),
  };

  TokenStream::from(quote! {
    #[tokio::test(#tokio_args)]
    #input
  })
}
