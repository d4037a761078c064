//! Namers driven by a resolved interface from the fixture model and config.

use apigen_config::{ConfigProto, InterfaceConfig, MethodConfig, resolve_interface};
use apigen_model::Model;
use apigen_surface::{
    CallingForm, MethodContext, SurfaceNamer, Synchronicity, Visibility, namer_for_config,
    namer_for_language,
};
use std::path::{Path, PathBuf};

const LIBRARY: &str = "google.example.library.v1.LibraryService";

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn config() -> ConfigProto {
    ConfigProto::load(&fixtures_dir().join("library.yaml")).unwrap()
}

fn library() -> InterfaceConfig {
    let text = std::fs::read_to_string(fixtures_dir().join("library_model.json")).unwrap();
    let model: Model = serde_json::from_str(&text).unwrap();
    let config = config();
    let proto = config
        .interfaces
        .iter()
        .find(|i| i.name == LIBRARY)
        .unwrap();
    let resolved = resolve_interface(&model, proto).unwrap();
    assert!(resolved.diagnostics.is_empty(), "{:#?}", resolved.diagnostics);
    resolved.value.unwrap()
}

fn method_config<'a>(ic: &'a InterfaceConfig, name: &str) -> &'a MethodConfig {
    ic.method_config_by_name(name).unwrap()
}

fn forms(namer: &dyn SurfaceNamer, context: &MethodContext<'_>) -> Vec<&'static str> {
    namer
        .calling_forms(context)
        .into_iter()
        .map(|f| f.as_str())
        .collect()
}

#[test]
fn ruby_interface_names() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    assert_eq!(namer.language(), "ruby");

    assert_eq!(namer.api_wrapper_class_name(&ic), "LibraryServiceClient");
    assert_eq!(
        namer.fully_qualified_api_wrapper_class_name(&ic),
        "Google::Cloud::Library::V1::LibraryServiceClient"
    );
    assert_eq!(namer.api_wrapper_variable_name(&ic), "library_client");
    assert_eq!(namer.api_snippets_class_name(&ic), "LibraryServiceClientSnippets");
    assert_eq!(
        namer.service_file_name(&ic),
        "google/cloud/library/v1/library_service_client"
    );
    assert_eq!(
        namer.client_config_path(&ic),
        "library_service_client_config.json"
    );
    assert_eq!(
        namer.version_aliased_api_class_name(&ic, true),
        "Google::Cloud::Library::V1::Library"
    );
    assert_eq!(
        namer.top_level_aliased_api_class_name(&ic, true),
        "Google::Cloud::Library::Library"
    );
    assert_eq!(
        namer.top_level_aliased_api_class_name(&ic, false),
        "Google::Cloud::Library"
    );
    assert_eq!(
        namer.fully_qualified_stub_type(ic.interface()),
        "Google::Example::Library::V1::LibraryService::Stub"
    );
    assert_eq!(
        namer.grpc_client_type_name(ic.interface()),
        "Google::Example::Library::V1::LibraryService"
    );
}

#[test]
fn ruby_resource_name_helpers() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    let book = ic.collection_config("book").unwrap();
    assert_eq!(namer.format_function_name(book), "book_path");
    assert_eq!(namer.parse_function_name("shelf", book), "match_shelf_from_book_name");
    assert_eq!(namer.path_template_name(book), "BOOK_PATH_TEMPLATE");
}

#[test]
fn ruby_paged_method() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    let context = MethodContext::new(&ic, method_config(&ic, "ListBooks"));

    assert_eq!(
        namer.api_method_name(context.method(), Visibility::Public),
        "list_books"
    );
    assert_eq!(
        namer.dynamic_lang_return_type_name(&context),
        "Google::Gax::PagedEnumerable<Google::Example::Library::V1::Book>"
    );
    assert_eq!(
        forms(namer.as_ref(), &context),
        vec!["request_paged_all", "request_paged"]
    );
    assert_eq!(
        namer.sample_used_var_names(&context, CallingForm::RequestPaged),
        vec!["element", "page"]
    );
    assert_eq!(
        namer.sample_response_var_name(&context, CallingForm::RequestPagedAll),
        "element"
    );
    insta::assert_snapshot!(
        namer.return_doc_lines(&context, Synchronicity::Sync).join("\n"),
        @r"
    An enumerable of Google::Example::Library::V1::Book instances.
    See Google::Gax::PagedEnumerable documentation for other
    operations such as per-page iteration or access to the response
    object.
    "
    );
}

#[test]
fn ruby_streaming_and_long_running_methods() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();

    let stream = MethodContext::new(&ic, method_config(&ic, "StreamShelves"));
    assert_eq!(
        namer.dynamic_lang_return_type_name(&stream),
        "Enumerable<Google::Example::Library::V1::ListBooksResponse>"
    );
    assert_eq!(forms(namer.as_ref(), &stream), vec!["request_streaming_server"]);
    assert_eq!(
        namer.return_doc_lines(&stream, Synchronicity::Sync),
        vec![
            "An enumerable of Google::Example::Library::V1::ListBooksResponse instances."
                .to_string(),
            String::new(),
        ]
    );

    let archive = MethodContext::new(&ic, method_config(&ic, "ArchiveBooks"));
    assert_eq!(
        namer.dynamic_lang_return_type_name(&archive),
        "Google::Gax::Operation"
    );
    assert_eq!(
        namer.default_calling_form(&archive),
        CallingForm::LongRunningRequestAsync
    );
    assert_eq!(
        namer.sample_used_var_names(&archive, CallingForm::LongRunningRequestAsync),
        vec!["op", "response", "metadata"]
    );
    let lro = archive.method_config().long_running().unwrap();
    assert_eq!(
        namer.long_running_operation_type_name(&lro.return_type),
        "Google::Example::Library::V1::Book"
    );
}

#[test]
fn ruby_doc_text() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    let get = MethodContext::for_method(&ic, ic.interface().lookup_method("GetBook").unwrap())
        .unwrap();

    let request_field = &get.method_config().required_fields()[0];
    let doc = namer.param_doc_text(
        &request_field.name,
        &namer.param_type_name(&request_field.type_ref),
        "The [book](/docs/books) to fetch, as `shelves/*/books/*`.",
    );
    assert_eq!(
        doc,
        "@param name {String} The {book}[https://cloud.google.com/docs/books] to fetch, as +shelves/*/books/*+."
    );
    assert_eq!(
        namer.throws_doc_lines(get.method_config()),
        vec!["@raise [Google::Gax::GaxError] if the RPC is aborted."]
    );
    assert!(namer.return_doc_lines(&get, Synchronicity::Sync).is_empty());
    assert_eq!(namer.sample_used_var_names(&get, CallingForm::Request), vec!["response"]);
}

#[test]
fn ruby_smoke_test_values() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    let smoke = ic.smoke_test_config().unwrap();
    let parent = smoke.init_fields().get("parent").unwrap();
    assert_eq!(
        namer.inject_random_string_generator_code(parent),
        "\"shelves/\" + Time.new.to_i.to_s"
    );
    assert_eq!(namer.sample_function_name(smoke.method()), "sample_list_books");
}

#[test]
fn rerouted_method_keeps_its_own_interface() {
    let ic = library();
    let namer = namer_for_config(&config()).unwrap();
    let add_label = method_config(&ic, "AddLabel");
    assert_eq!(
        add_label.method().full_name,
        "google.example.library.v1.LabelerService.AddLabel"
    );
    assert_eq!(
        namer.api_method_name(add_label.method(), Visibility::Public),
        "add_label"
    );
}

#[test]
fn python_and_common_namers_share_the_interface() {
    let ic = library();
    let python = namer_for_language("python", "google.cloud.library.v1").unwrap();
    let common = namer_for_language("common", "google.example.library.v1").unwrap();
    let list = MethodContext::new(&ic, method_config(&ic, "ListBooks"));
    let get = MethodContext::new(&ic, method_config(&ic, "GetBook"));

    assert_eq!(
        python.dynamic_lang_return_type_name(&list),
        "Iterable[google.example.library.v1.Book]"
    );
    assert_eq!(python.api_wrapper_variable_name(&ic), "library_service_client");
    assert_eq!(
        python.api_method_name(get.method(), Visibility::Private),
        "_get_book"
    );

    assert_eq!(common.api_method_name(get.method(), Visibility::Public), "getBook");
    assert_eq!(
        common.client_config_path(&ic),
        "libraryServiceClientConfig.json"
    );
    assert_eq!(
        common.grpc_stub_call_string(ic.interface(), get.method()),
        "/google.example.library.v1.LibraryService/GetBook"
    );

    let rebound = python.clone_with_package_name("google.cloud.library.v2");
    assert_eq!(rebound.api_wrapper_module_version(), "v2");
    assert_eq!(python.api_wrapper_module_version(), "v1");
}
