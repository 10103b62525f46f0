//! Line-based writer for generated declarations.

use vmgen_core::{
    Accessors, ConditionalBlock, GeneratedDecl, GeneratedField, GeneratedFunction,
    GeneratedInitializer, GeneratedProperty, GeneratedType, Stmt, Visibility,
};

use crate::expr::{render_expr, render_params, render_stmt};
use crate::RenderOptions;

pub(crate) struct SwiftWriter<'a> {
    options: &'a RenderOptions,
    lines: Vec<String>,
    depth: usize,
}

impl<'a> SwiftWriter<'a> {
    pub(crate) fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let indent = " ".repeat(self.depth * self.options.indent_width);
        self.lines.push(format!("{}{}", indent, text.as_ref()));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `header {`, body one level deeper, `}`. An empty body collapses to `header {}`.
    fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        let start = self.lines.len();
        self.line(format!("{} {{", header));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        if self.lines.len() == start + 1 {
            self.lines.pop();
            self.line(format!("{} {{}}", header));
        } else {
            self.line("}");
        }
    }

    /// Declarations separated by a blank line wherever either neighbour spans several lines.
    pub(crate) fn write_decls(&mut self, decls: &[GeneratedDecl]) {
        let mut previous: Option<&GeneratedDecl> = None;
        for decl in decls {
            if let Some(prev) = previous {
                if is_block(prev) || is_block(decl) {
                    self.blank();
                }
            }
            self.write_decl(decl);
            previous = Some(decl);
        }
    }

    fn write_decl(&mut self, decl: &GeneratedDecl) {
        match decl {
            GeneratedDecl::Field(field) => self.write_field(field),
            GeneratedDecl::Property(property) => self.write_property(property),
            GeneratedDecl::Function(function) => self.write_function(function),
            GeneratedDecl::Initializer(init) => self.write_initializer(init),
            GeneratedDecl::Type(ty) => self.write_type(ty),
            GeneratedDecl::Case(name) => self.line(format!("case {}", name)),
            GeneratedDecl::Conditional(block) => self.write_conditional(block),
        }
    }

    fn write_field(&mut self, field: &GeneratedField) {
        let mut header = modifiers(field.visibility);
        if let Some(setter) = field.setter_visibility.and_then(Visibility::keyword) {
            header.push_str(&format!("{}(set) ", setter));
        }
        if field.is_static {
            header.push_str("static ");
        }
        header.push_str(&format!("var {}: {}", field.name, field.ty));
        if let Some(value) = &field.initializer {
            header.push_str(&format!(" = {}", render_expr(value)));
        }
        self.line(header);
    }

    fn write_property(&mut self, property: &GeneratedProperty) {
        let header = format!(
            "{}var {}: {}",
            modifiers(property.visibility),
            property.name,
            property.ty
        );

        match &property.accessors {
            Accessors::Requirement { settable: true } => self.line(format!("{} {{ get set }}", header)),
            Accessors::Requirement { settable: false } => self.line(format!("{} {{ get }}", header)),
            Accessors::Computed { get, set: None } => {
                self.block(&header, |w| w.write_stmts(get));
            }
            Accessors::Computed { get, set: Some(set) } => {
                self.block(&header, |w| {
                    w.block("get", |w| w.write_stmts(get));
                    w.block("set", |w| w.write_stmts(set));
                });
            }
            Accessors::Binding { get, set } => {
                self.block(&header, |w| {
                    w.line(".init {");
                    w.depth += 1;
                    w.line(format!("return {}", render_expr(get)));
                    w.depth -= 1;
                    w.line("} set: { newValue in");
                    w.depth += 1;
                    w.write_stmts(set);
                    w.depth -= 1;
                    w.line("}");
                });
            }
        }
    }

    fn write_function(&mut self, function: &GeneratedFunction) {
        let mut header = modifiers(function.visibility);
        if function.is_static {
            header.push_str("static ");
        }
        if function.is_mutating {
            header.push_str("mutating ");
        }
        header.push_str(&format!(
            "func {}({}){}",
            function.name,
            render_params(&function.params),
            function.effects.keywords()
        ));
        if let Some(ret) = &function.return_type {
            header.push_str(&format!(" -> {}", ret));
        }

        match &function.body {
            Some(body) => self.block(&header, |w| w.write_stmts(body)),
            None => self.line(header),
        }
    }

    fn write_initializer(&mut self, init: &GeneratedInitializer) {
        let header = format!(
            "{}init({})",
            modifiers(init.visibility),
            render_params(&init.params)
        );
        self.block(&header, |w| w.write_stmts(&init.body));
    }

    fn write_type(&mut self, ty: &GeneratedType) {
        let mut header = modifiers(ty.visibility);
        if ty.is_final {
            header.push_str("final ");
        }
        header.push_str(&format!("{} {}", ty.kind.keyword(), ty.name));
        if !ty.conformances.is_empty() {
            header.push_str(&format!(": {}", ty.conformances.join(", ")));
        }
        self.block(&header, |w| w.write_decls(&ty.members));
    }

    fn write_conditional(&mut self, block: &ConditionalBlock) {
        self.line(format!("#if {}", block.condition));
        self.write_decls(&block.body);
        self.line("#endif");
    }

    fn write_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            match render_stmt(stmt) {
                Some(text) => self.line(text),
                None => self.write_switch(stmt),
            }
        }
    }

    fn write_switch(&mut self, stmt: &Stmt) {
        let Stmt::Switch { subject, arms } = stmt else {
            return;
        };
        self.block(&format!("switch {}", render_expr(subject)), |w| {
            // Arms sit at the switch's own level.
            w.depth -= 1;
            for arm in arms {
                w.line(format!("case {}:", render_expr(&arm.pattern)));
                w.depth += 1;
                w.write_stmts(&arm.body);
                w.depth -= 1;
            }
            w.depth += 1;
        });
    }
}

fn modifiers(visibility: Visibility) -> String {
    match visibility.keyword() {
        Some(keyword) => format!("{} ", keyword),
        None => String::new(),
    }
}

fn is_block(decl: &GeneratedDecl) -> bool {
    match decl {
        GeneratedDecl::Field(_) | GeneratedDecl::Case(_) => false,
        GeneratedDecl::Property(property) => {
            !matches!(property.accessors, Accessors::Requirement { .. })
        }
        GeneratedDecl::Function(function) => function.body.is_some(),
        GeneratedDecl::Initializer(_) | GeneratedDecl::Type(_) | GeneratedDecl::Conditional(_) => {
            true
        }
    }
}
