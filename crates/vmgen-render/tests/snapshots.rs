use insta::assert_snapshot;
use proptest::prelude::*;
use vmgen_core::builder::{freestanding, marker, AttributeBuilder, FieldBuilder, FunctionBuilder, TypeBuilder};
use vmgen_core::{Argument, Decl, Expr, GeneratedDecl, Parameter, SourceFile, TypeRef};
use vmgen_expander::Expander;
use vmgen_render::{render, RenderOptions};

fn expand(decl: impl Into<Decl>) -> Vec<GeneratedDecl> {
    let file = SourceFile { declarations: vec![decl.into()] };
    let report = Expander::default().expand_file(&file);
    assert!(report.is_success(), "{:?}", report.diagnostics);
    report.declarations().cloned().collect()
}

fn rendered(decl: impl Into<Decl>) -> String {
    render(&expand(decl), &RenderOptions::default())
}

#[test]
fn test_case_labels() {
    let route = TypeBuilder::enumeration("Route")
        .attribute(marker("EnumCaseLabels"))
        .case("home")
        .case_with("detail", vec![TypeRef::named("Int")])
        .case("settings");

    assert_snapshot!(rendered(route), @r###"
    enum CaseLabels {
        case home
        case detail
        case settings

        init(parent: Route) {
            switch parent {
            case .home:
                self = .home
            case .detail:
                self = .detail
            case .settings:
                self = .settings
            }
        }
    }
    "###);
}

#[test]
fn test_mutators_with_coupled_value() {
    let sheet = FieldBuilder::var("sheet")
        .ty(TypeRef::optional(TypeRef::named("Sheet")))
        .attribute(
            AttributeBuilder::new("GenerateMutators")
                .arg("name", Expr::string("Sheet"))
                .arg("coupledValueType", Expr::type_value("UserContext"))
                .build(),
        );

    assert_snapshot!(rendered(sheet), @r###"
    private(set) var sheet_UserContext: UserContext?

    mutating func showSheet(_ value: Sheet, with userContext: UserContext) {
        self.sheet = value
        self.sheet_UserContext = userContext
    }

    mutating func hideSheet() {
        self.sheet = nil
        self.sheet_UserContext = nil
    }
    "###);
}

#[test]
fn test_bindings() {
    let view_model = TypeBuilder::class("ViewModel")
        .attribute(marker("GenerateBindings"))
        .member(
            FieldBuilder::var("state").ty(TypeRef::named("Model")).attribute(
                AttributeBuilder::new("BindTarget")
                    .positional(Expr::pair(Expr::path(Some("Model"), "count"), Expr::type_value("Int")))
                    .positional(Expr::pair(Expr::path(Some("Model"), "title"), Expr::type_value("String")))
                    .build(),
            ),
        )
        .member(
            FunctionBuilder::new("setCount")
                .param(Parameter::unlabeled("value", TypeRef::named("Int")))
                .attribute(
                    AttributeBuilder::new("Bindable")
                        .positional(Expr::path(Some("Model"), "count"))
                        .build(),
                ),
        );

    assert_snapshot!(rendered(view_model), @r###"
    var bindStateCount: Binding<Int> {
        .init {
            return self[keyPath: \.state.count]
        } set: { newValue in
            self.setCount(newValue)
        }
    }

    var bindStateTitle: Binding<String> {
        .init {
            return self[keyPath: \.state.title]
        } set: { newValue in
            self[keyPath: \.state.title] = newValue
        }
    }
    "###);
}

#[test]
fn test_testable_abstraction() {
    let service = TypeBuilder::class("Service")
        .attribute(marker("GenerateTestableImpl"))
        .member(FieldBuilder::constant("id").ty(TypeRef::named("UUID")))
        .member(FieldBuilder::var("count").initializer(Expr::integer("0")))
        .member(
            FunctionBuilder::new("fetch")
                .param(Parameter::labeled("id", TypeRef::named("Int")))
                .returns(TypeRef::named("String")),
        )
        .member(FunctionBuilder::new("reset").param(Parameter::unlabeled(
            "value",
            TypeRef::InOut(Box::new(TypeRef::named("Int"))),
        )));

    assert_snapshot!(rendered(service), @r###"
    protocol AnyImpl {
        var id: UUID { get }
        var count: Int { get set }
        func fetch(id: Int) -> String
        func reset(_ value: inout Int)
    }

    #if DEBUG
    final class TestableService: AnyImpl {
        var id: UUID
        var count: Int
        var fetchHandler: (Int) -> String

        func fetch(id: Int) -> String {
            return fetchHandler(id)
        }

        var resetHandler: (inout Int) -> Void

        func reset(_ value: inout Int) {
            resetHandler(&value)
        }

        init(id: UUID, count: Int, fetchHandler: @escaping (Int) -> String, resetHandler: @escaping (inout Int) -> Void) {
            self.id = id
            self.count = count
            self.fetchHandler = fetchHandler
            self.resetHandler = resetHandler
        }

        init(_ id: UUID, _ count: Int, _ fetchHandler: @escaping (Int) -> String, _ resetHandler: @escaping (inout Int) -> Void) {
            self.id = id
            self.count = count
            self.fetchHandler = fetchHandler
            self.resetHandler = resetHandler
        }
    }
    #endif
    "###);
}

#[test]
fn test_testable_effectful_functions() {
    let loader = TypeBuilder::structure("Loader")
        .attribute(marker("GenerateTestableImpl"))
        .member(
            FunctionBuilder::new("load")
                .param(Parameter::labeled("id", TypeRef::named("Int")))
                .returns(TypeRef::named("String"))
                .async_()
                .throws(),
        );

    assert_snapshot!(rendered(loader), @r###"
    protocol AnyImpl {
        func load(id: Int) async throws -> String
    }

    #if DEBUG
    struct TestableLoader: AnyImpl {
        var loadHandler: (Int) async throws -> String

        func load(id: Int) async throws -> String {
            return try await loadHandler(id)
        }

        init(loadHandler: @escaping (Int) async throws -> String) {
            self.loadHandler = loadHandler
        }

        init(_ loadHandler: @escaping (Int) async throws -> String) {
            self.loadHandler = loadHandler
        }
    }
    #endif
    "###);
}

#[test]
fn test_abstraction_key() {
    let site = freestanding(
        "GenerateKeyForImpl",
        vec![
            Argument::labeled("for", Expr::type_value("Service")),
            Argument::labeled("liveArgs", Expr::string("prod")),
        ],
    );

    assert_snapshot!(rendered(site), @r###"
    enum ServiceKey: DependencyKey {
        static var liveValue: any Service.AnyImpl = Service("prod")

        #if DEBUG
        static var previewValue: any Service.AnyImpl = Service.TestableService()
        #endif
    }

    var service: any Service.AnyImpl {
        get {
            self[ServiceKey.self]
        }
        set {
            self[ServiceKey.self] = newValue
        }
    }
    "###);
}

fn flag_host(names: &[String]) -> Decl {
    let mut host = TypeBuilder::structure("Screen");
    for name in names {
        host = host.member(
            FieldBuilder::var(name).initializer(Expr::bool(false)).attribute(
                AttributeBuilder::new("GenerateMutators")
                    .arg("name", Expr::string(name.to_uppercase()))
                    .build(),
            ),
        );
    }
    host.into()
}

proptest! {
    #[test]
    fn rendering_is_deterministic(names in prop::collection::btree_set("[a-z]{1,8}", 1..6)) {
        let names: Vec<String> = names.into_iter().collect();
        let first = rendered(flag_host(&names));
        let second = rendered(flag_host(&names));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn indentation_follows_width(width in 1usize..8) {
        let decls = expand(
            TypeBuilder::enumeration("Tab")
                .attribute(marker("EnumCaseLabels"))
                .case("feed")
                .case("inbox"),
        );
        let text = render(&decls, &RenderOptions { indent_width: width });
        for line in text.lines() {
            let indent = line.len() - line.trim_start().len();
            prop_assert_eq!(indent % width, 0);
        }
        let expected = format!("\n{}case feed\n", " ".repeat(width));
        prop_assert!(text.contains(&expected));
    }
}
