//! JavaScript writer.
//!
//! [`Translator`] walks a [`Module`] statement by statement and appends
//! JavaScript lines to an [`EmissionBuffer`]. Constructs without a
//! JavaScript rendering never abort translation: statements become an inline
//! `//` comment naming what was skipped, expressions become `null`.

pub mod buffer;
pub mod expr;
pub mod operators;

use std::collections::HashSet;

use crate::ast::*;
use crate::traits::Writer;
pub use buffer::{EmissionBuffer, INDENT};
pub use expr::ExprTranslator;
use operators::map_operator;

/// Static instance of the JavaScript writer for registry.
pub static JAVASCRIPT_WRITER: JavaScriptWriterImpl = JavaScriptWriterImpl;

/// JavaScript writer implementing the Writer trait.
pub struct JavaScriptWriterImpl;

impl Writer for JavaScriptWriterImpl {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn write(&self, module: &Module) -> String {
        Translator::emit(module)
    }
}

/// Names introduced with `let` inside one `{ ... }` block.
#[derive(Debug, Default)]
struct Scope {
    names: HashSet<String>,
    /// Module, function and class bodies; lookups stop here.
    boundary: bool,
}

/// Translates a Python module into JavaScript source.
///
/// One instance serves one translation at a time; [`Translator::translate`]
/// resets all state before walking.
#[derive(Debug)]
pub struct Translator {
    buffer: EmissionBuffer,
    scopes: Vec<Scope>,
    /// First parameter of the method being translated.
    self_name: Option<String>,
    /// Catch bindings of the enclosing handlers, innermost last.
    handlers: Vec<String>,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            buffer: EmissionBuffer::new(),
            scopes: vec![Scope {
                names: HashSet::new(),
                boundary: true,
            }],
            self_name: None,
            handlers: Vec::new(),
        }
    }

    /// Translate a module with a fresh translator.
    pub fn emit(module: &Module) -> String {
        Self::new().translate(module)
    }

    /// Translate every top-level statement and return the joined output.
    pub fn translate(&mut self, module: &Module) -> String {
        self.reset();
        for stmt in &module.body {
            self.handle(stmt);
        }
        tracing::debug!(lines = self.buffer.lines().len(), "translated module");
        self.buffer.join()
    }

    /// Append the translation of one statement at the current depth.
    pub fn handle(&mut self, stmt: &Stmt) {
        tracing::trace!(kind = %stmt.kind(), depth = self.depth(), "handling statement");
        match stmt {
            Stmt::Assign { targets, value } => self.handle_assign(targets, value),
            Stmt::AugAssign { target, op, value } => self.handle_aug_assign(target, *op, value),
            Stmt::Expr { value } => {
                let value = self.expr(value);
                self.buffer.push(format!("{value};"));
            }
            Stmt::If { test, body, orelse } => self.handle_if(test, body, orelse),
            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => self.handle_for(target, iter, body, orelse),
            Stmt::While { test, body, orelse } => self.handle_while(test, body, orelse),
            Stmt::FunctionDef(def) => self.handle_function(def),
            Stmt::ClassDef { name, body } => self.handle_class(name, body),
            Stmt::Match { subject, cases } => self.handle_match(subject, cases),
            Stmt::Try {
                body,
                handlers,
                orelse,
                finalbody,
            } => self.handle_try(body, handlers, orelse, finalbody),
            Stmt::Return { value } => match value {
                Some(value) => {
                    let value = self.expr(value);
                    self.buffer.push(format!("return {value};"));
                }
                None => self.buffer.push("return;"),
            },
            Stmt::Raise { exc } => self.handle_raise(exc.as_ref()),
            Stmt::Pass => {}
            Stmt::Break => self.buffer.push("break;"),
            Stmt::Continue => self.buffer.push("continue;"),
            Stmt::Unsupported { kind } => {
                tracing::debug!(%kind, "no handler for statement");
                self.buffer.push(format!("// Unhandled node type: {kind}"));
            }
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.scopes.truncate(1);
        if let Some(root) = self.scopes.first_mut() {
            root.names.clear();
        }
        self.self_name = None;
        self.handlers.clear();
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.buffer.depth()
    }

    /// Lines emitted so far, already indented.
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    fn handle_all(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.handle(stmt);
        }
    }

    fn handle_assign(&mut self, targets: &[Expr], value: &Expr) {
        let [target] = targets else {
            self.unsupported("Multiple assignment not supported");
            return;
        };
        let value = self.expr(value);
        if let Expr::Name { id } = target {
            if self.is_declared(id) {
                self.buffer.push(format!("{id} = {value};"));
            } else {
                self.declare(id);
                self.buffer.push(format!("let {id} = {value};"));
            }
            return;
        }
        match self.attribute_target(target) {
            Some(target) => self.buffer.push(format!("{target} = {value};")),
            None => self.unsupported("Unsupported target type"),
        }
    }

    fn handle_aug_assign(&mut self, target: &Expr, op: Operator, value: &Expr) {
        let target = match target {
            Expr::Name { id } => Some(id.clone()),
            other => self.attribute_target(other),
        };
        let Some(target) = target else {
            self.unsupported("Unsupported target type");
            return;
        };
        let value = self.expr(value);
        self.buffer
            .push(format!("{target} {}= {value};", map_operator(op)));
    }

    /// `self.field` inside a method; no other attribute target is writable.
    fn attribute_target(&self, target: &Expr) -> Option<String> {
        let Expr::Attribute { value, attr } = target else {
            return None;
        };
        match value.as_ref() {
            Expr::Name { id } if self.self_name.as_deref() == Some(id.as_str()) => {
                Some(format!("{}.{attr}", expr::SELF_TOKEN))
            }
            _ => None,
        }
    }

    fn handle_if(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt]) {
        let test = self.expr(test);
        self.braced(format!("if ({test})"), |t| t.handle_all(body));
        if !orelse.is_empty() {
            self.braced("else".to_string(), |t| t.handle_all(orelse));
        }
    }

    fn handle_for(&mut self, target: &Expr, iter: &Expr, body: &[Stmt], orelse: &[Stmt]) {
        let Some((binding, names)) = loop_target(target) else {
            self.unsupported("Unsupported target type");
            return;
        };
        let iter = self.expr(iter);
        self.braced(format!("for (let {binding} of {iter})"), |t| {
            for name in &names {
                t.declare(name);
            }
            t.handle_all(body);
        });
        if !orelse.is_empty() {
            self.unsupported("Unsupported loop else clause");
        }
    }

    fn handle_while(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt]) {
        let test = self.expr(test);
        self.braced(format!("while ({test})"), |t| t.handle_all(body));
        if !orelse.is_empty() {
            self.unsupported("Unsupported loop else clause");
        }
    }

    fn handle_function(&mut self, def: &FunctionDef) {
        self.declare(&def.name);
        // Arrow functions keep the enclosing `this` unless a parameter shadows it.
        let self_name = self
            .self_name
            .clone()
            .filter(|name| !def.params.contains(name));
        self.callable(
            format!("const {} = ({}) =>", def.name, def.params.join(", ")),
            &def.params,
            self_name,
            &def.body,
        );
    }

    fn handle_class(&mut self, name: &str, body: &[Stmt]) {
        self.declare(name);
        let saved = self.self_name.take();
        self.buffer.push(format!("class {name} {{"));
        // `constructor` always leads the class body.
        let (init, rest): (Vec<&Stmt>, Vec<&Stmt>) = body
            .iter()
            .partition(|stmt| matches!(stmt, Stmt::FunctionDef(def) if def.name == "__init__"));
        self.scoped(true, |t| {
            for stmt in init.into_iter().chain(rest) {
                match stmt {
                    Stmt::FunctionDef(def) => t.handle_method(def),
                    other => t.handle(other),
                }
            }
        });
        self.buffer.push("}");
        self.self_name = saved;
    }

    fn handle_method(&mut self, def: &FunctionDef) {
        let name = if def.name == "__init__" {
            "constructor"
        } else {
            def.name.as_str()
        };
        let (self_name, params) = match def.params.split_first() {
            Some((first, rest)) if !first.starts_with("...") => (Some(first.clone()), rest),
            _ => (None, def.params.as_slice()),
        };
        self.callable(
            format!("{name}({})", params.join(", ")),
            params,
            self_name,
            &def.body,
        );
    }

    /// Emit a function-like block: `<header> {`, body in its own
    /// declaration boundary with `params` pre-declared, `}`.
    fn callable(
        &mut self,
        header: String,
        params: &[String],
        self_name: Option<String>,
        body: &[Stmt],
    ) {
        let saved = std::mem::replace(&mut self.self_name, self_name);
        let saved_handlers = std::mem::take(&mut self.handlers);
        self.buffer.push(format!("{header} {{"));
        self.scoped(true, |t| {
            for param in params {
                t.declare(param.trim_start_matches("..."));
            }
            t.handle_all(body);
        });
        self.buffer.push("}");
        self.handlers = saved_handlers;
        self.self_name = saved;
    }

    fn handle_match(&mut self, subject: &Expr, cases: &[MatchCase]) {
        let subject = self.expr(subject);
        self.braced(format!("switch ({subject})"), |t| {
            for case in cases {
                t.handle_case(case);
            }
        });
    }

    fn handle_case(&mut self, case: &MatchCase) {
        let label = match (&case.pattern, &case.guard) {
            (Pattern::Value(value), None) => Some(format!("case {}:", self.expr(value))),
            (Pattern::Singleton(value), None) => Some(format!("case {}:", expr::constant(value))),
            (Pattern::Wildcard, None) => Some("default:".to_string()),
            _ => None,
        };
        let Some(label) = label else {
            self.unsupported("Unsupported case pattern");
            return;
        };
        self.buffer.push(label);
        // Case clauses share the switch block's lexical scope.
        EmissionBuffer::indented(self, |t| {
            t.handle_all(&case.body);
            t.buffer.push("break;");
        });
    }

    fn handle_try(
        &mut self,
        body: &[Stmt],
        handlers: &[ExceptHandler],
        orelse: &[Stmt],
        finalbody: &[Stmt],
    ) {
        self.braced("try".to_string(), |t| t.handle_all(body));
        for handler in handlers {
            let name = handler.name.as_deref().unwrap_or("e");
            let label = match &handler.type_ {
                Some(type_) => self.exception_type(type_),
                None => "Error".to_string(),
            };
            self.handlers.push(name.to_string());
            self.braced(format!("catch ({name} /* {label} */)"), |t| {
                t.declare(name);
                t.handle_all(&handler.body);
            });
            self.handlers.pop();
        }
        if !orelse.is_empty() {
            self.unsupported("Unsupported try else clause");
        }
        if !finalbody.is_empty() {
            self.braced("finally".to_string(), |t| t.handle_all(finalbody));
        }
    }

    fn exception_type(&self, type_: &Expr) -> String {
        match type_ {
            Expr::Tuple { elts } => elts
                .iter()
                .map(|elt| self.expr(elt))
                .collect::<Vec<_>>()
                .join(" | "),
            other => self.expr(other),
        }
    }

    fn handle_raise(&mut self, exc: Option<&Expr>) {
        let thrown = match exc {
            Some(exc) => self.expr(exc),
            // A bare `raise` rethrows the exception being handled.
            None => self
                .handlers
                .last()
                .cloned()
                .unwrap_or_else(|| operators::UNMAPPED.to_string()),
        };
        self.buffer.push(format!("throw {thrown};"));
    }

    fn unsupported(&mut self, marker: &str) {
        tracing::debug!(marker, "unsupported construct");
        self.buffer.push(format!("// {marker}"));
    }

    fn expr(&self, expr: &Expr) -> String {
        ExprTranslator::new(self.self_name.as_deref()).translate(expr)
    }

    /// `<header> {`, nested body, `}`.
    fn braced(&mut self, header: String, body: impl FnOnce(&mut Self)) {
        self.buffer.push(format!("{header} {{"));
        self.scoped(false, body);
        self.buffer.push("}");
    }

    /// Run `body` one level deeper inside a fresh declaration scope.
    fn scoped(&mut self, boundary: bool, body: impl FnOnce(&mut Self)) {
        self.scopes.push(Scope {
            names: HashSet::new(),
            boundary,
        });
        EmissionBuffer::indented(self, body);
        self.scopes.pop();
    }

    fn is_declared(&self, name: &str) -> bool {
        for scope in self.scopes.iter().rev() {
            if scope.names.contains(name) {
                return true;
            }
            if scope.boundary {
                break;
            }
        }
        false
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.names.insert(name.to_string());
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl AsMut<EmissionBuffer> for Translator {
    fn as_mut(&mut self) -> &mut EmissionBuffer {
        &mut self.buffer
    }
}

/// Loop variable text and the names it binds: `x`, or `[a, b]` for tuple
/// unpacking of plain names.
fn loop_target(target: &Expr) -> Option<(String, Vec<String>)> {
    match target {
        Expr::Name { id } => Some((id.clone(), vec![id.clone()])),
        Expr::Tuple { elts } | Expr::List { elts } => {
            let names = elts
                .iter()
                .map(|elt| match elt {
                    Expr::Name { id } => Some(id.clone()),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            Some((format!("[{}]", names.join(", ")), names))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(body: Vec<Stmt>) -> String {
        Translator::emit(&Module::new(body))
    }

    fn print(args: Vec<Expr>) -> Stmt {
        Stmt::expr(Expr::call(Expr::name("print"), args))
    }

    #[test]
    fn test_constant_assignment_declares() {
        assert_eq!(emit(vec![Stmt::assign(Expr::name("x"), Expr::int(10))]), "let x = 10;");
        assert_eq!(
            emit(vec![Stmt::assign(Expr::name("s"), Expr::str("hi"))]),
            "let s = \"hi\";"
        );
    }

    #[test]
    fn test_reassignment_is_plain() {
        let out = emit(vec![
            Stmt::assign(Expr::name("x"), Expr::int(1)),
            Stmt::assign(Expr::name("x"), Expr::int(2)),
        ]);
        assert_eq!(out, "let x = 1;\nx = 2;");
    }

    #[test]
    fn test_multiple_targets_unsupported() {
        let stmt = Stmt::Assign {
            targets: vec![Expr::name("a"), Expr::name("b")],
            value: Expr::int(1),
        };
        assert_eq!(emit(vec![stmt]), "// Multiple assignment not supported");
    }

    #[test]
    fn test_non_self_attribute_target_unsupported() {
        let stmt = Stmt::assign(Expr::attribute(Expr::name("p"), "name"), Expr::int(1));
        assert_eq!(emit(vec![stmt]), "// Unsupported target type");
    }

    #[test]
    fn test_aug_assign() {
        let stmt = Stmt::AugAssign {
            target: Expr::name("x"),
            op: Operator::Sub,
            value: Expr::int(1),
        };
        assert_eq!(emit(vec![stmt]), "x -= 1;");
    }

    #[test]
    fn test_unhandled_kind_is_idempotent() {
        let out = emit(vec![
            Stmt::unsupported(StmtKind::Import),
            Stmt::unsupported(StmtKind::Import),
        ]);
        assert_eq!(
            out,
            "// Unhandled node type: Import\n// Unhandled node type: Import"
        );
    }

    #[test]
    fn test_if_without_else() {
        let stmt = Stmt::if_stmt(
            Expr::compare(Expr::name("x"), CmpOp::Gt, Expr::name("y")),
            vec![print(vec![Expr::str("x is greater")])],
            vec![],
        );
        assert_eq!(
            emit(vec![stmt]),
            "if (x > y) {\n    console.log(\"x is greater\");\n}"
        );
    }

    #[test]
    fn test_if_with_else() {
        let stmt = Stmt::if_stmt(
            Expr::name("ok"),
            vec![Stmt::Pass],
            vec![print(vec![Expr::str("no")])],
        );
        assert_eq!(
            emit(vec![stmt]),
            "if (ok) {\n}\nelse {\n    console.log(\"no\");\n}"
        );
    }

    #[test]
    fn test_for_declares_fresh_variable() {
        let stmt = Stmt::For {
            target: Expr::name("num"),
            iter: Expr::name("numbers"),
            body: vec![Stmt::assign(Expr::name("num"), Expr::int(0))],
            orelse: vec![],
        };
        assert_eq!(
            emit(vec![stmt]),
            "for (let num of numbers) {\n    num = 0;\n}"
        );
    }

    #[test]
    fn test_for_tuple_target_destructures() {
        let stmt = Stmt::For {
            target: Expr::Tuple {
                elts: vec![Expr::name("k"), Expr::name("v")],
            },
            iter: Expr::name("pairs"),
            body: vec![],
            orelse: vec![Stmt::Pass],
        };
        assert_eq!(
            emit(vec![stmt]),
            "for (let [k, v] of pairs) {\n}\n// Unsupported loop else clause"
        );
    }

    #[test]
    fn test_function_definition() {
        let def = FunctionDef::new(
            "greet",
            vec!["name".to_string(), "age".to_string()],
            vec![Stmt::Return {
                value: Some(Expr::name("name")),
            }],
        );
        assert_eq!(
            emit(vec![Stmt::FunctionDef(def)]),
            "const greet = (name, age) => {\n    return name;\n}"
        );
    }

    #[test]
    fn test_parameters_are_predeclared() {
        let def = FunctionDef::new(
            "f",
            vec!["x".to_string()],
            vec![Stmt::assign(Expr::name("x"), Expr::int(1))],
        );
        assert_eq!(
            emit(vec![Stmt::FunctionDef(def)]),
            "const f = (x) => {\n    x = 1;\n}"
        );
    }

    #[test]
    fn test_function_scope_is_a_boundary() {
        let def = FunctionDef::new(
            "f",
            vec![],
            vec![Stmt::assign(Expr::name("x"), Expr::int(2))],
        );
        let out = emit(vec![
            Stmt::assign(Expr::name("x"), Expr::int(1)),
            Stmt::FunctionDef(def),
        ]);
        assert_eq!(out, "let x = 1;\nconst f = () => {\n    let x = 2;\n}");
    }

    #[test]
    fn test_class_methods() {
        let init = FunctionDef::new(
            "__init__",
            vec!["self".to_string(), "name".to_string()],
            vec![Stmt::assign(
                Expr::attribute(Expr::name("self"), "name"),
                Expr::name("name"),
            )],
        );
        let hello = FunctionDef::new(
            "hello",
            vec!["self".to_string()],
            vec![print(vec![Expr::attribute(Expr::name("self"), "name")])],
        );
        let class = Stmt::ClassDef {
            name: "Person".to_string(),
            body: vec![Stmt::FunctionDef(init), Stmt::FunctionDef(hello)],
        };
        assert_eq!(
            emit(vec![class]),
            "class Person {\n    constructor(name) {\n        this.name = name;\n    }\n    hello() {\n        console.log(this.name);\n    }\n}"
        );
    }

    #[test]
    fn test_self_rewriting_follows_first_parameter_name() {
        let method = FunctionDef::new(
            "get",
            vec!["me".to_string()],
            vec![Stmt::Return {
                value: Some(Expr::attribute(Expr::name("me"), "value")),
            }],
        );
        let class = Stmt::ClassDef {
            name: "Box".to_string(),
            body: vec![Stmt::FunctionDef(method)],
        };
        assert_eq!(
            emit(vec![class]),
            "class Box {\n    get() {\n        return this.value;\n    }\n}"
        );
    }

    #[test]
    fn test_constructor_hoisted_first() {
        let describe = FunctionDef::new("describe", vec!["self".to_string()], vec![Stmt::Pass]);
        let init = FunctionDef::new("__init__", vec!["self".to_string()], vec![Stmt::Pass]);
        let class = Stmt::ClassDef {
            name: "Late".to_string(),
            body: vec![Stmt::FunctionDef(describe), Stmt::FunctionDef(init)],
        };
        assert_eq!(
            emit(vec![class]),
            "class Late {\n    constructor() {\n    }\n    describe() {\n    }\n}"
        );
    }

    #[test]
    fn test_self_attribute_outside_method_unsupported() {
        let stmt = Stmt::assign(Expr::attribute(Expr::name("self"), "x"), Expr::int(1));
        assert_eq!(emit(vec![stmt]), "// Unsupported target type");
    }

    #[test]
    fn test_match_cases() {
        let stmt = Stmt::Match {
            subject: Expr::name("x"),
            cases: vec![
                MatchCase {
                    pattern: Pattern::Value(Expr::str("A")),
                    guard: None,
                    body: vec![print(vec![Expr::str("a")])],
                },
                MatchCase {
                    pattern: Pattern::Unsupported(PatternKind::MatchClass),
                    guard: None,
                    body: vec![print(vec![Expr::str("class")])],
                },
                MatchCase {
                    pattern: Pattern::Wildcard,
                    guard: None,
                    body: vec![print(vec![Expr::str("other")])],
                },
            ],
        };
        assert_eq!(
            emit(vec![stmt]),
            [
                "switch (x) {",
                "    case \"A\":",
                "        console.log(\"a\");",
                "        break;",
                "    // Unsupported case pattern",
                "    default:",
                "        console.log(\"other\");",
                "        break;",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_guarded_case_unsupported() {
        let stmt = Stmt::Match {
            subject: Expr::name("x"),
            cases: vec![MatchCase {
                pattern: Pattern::Value(Expr::int(1)),
                guard: Some(Expr::name("flag")),
                body: vec![Stmt::Pass],
            }],
        };
        assert_eq!(
            emit(vec![stmt]),
            "switch (x) {\n    // Unsupported case pattern\n}"
        );
    }

    #[test]
    fn test_try_except_finally() {
        let stmt = Stmt::Try {
            body: vec![Stmt::assign(
                Expr::name("result"),
                Expr::binop(Expr::int(10), Operator::Div, Expr::int(0)),
            )],
            handlers: vec![
                ExceptHandler {
                    type_: Some(Expr::name("ZeroDivisionError")),
                    name: Some("err".to_string()),
                    body: vec![Stmt::Raise { exc: None }],
                },
                ExceptHandler {
                    type_: None,
                    name: None,
                    body: vec![Stmt::Pass],
                },
            ],
            orelse: vec![],
            finalbody: vec![print(vec![Expr::str("done")])],
        };
        assert_eq!(
            emit(vec![stmt]),
            [
                "try {",
                "    let result = 10 / 0;",
                "}",
                "catch (err /* ZeroDivisionError */) {",
                "    throw err;",
                "}",
                "catch (e /* Error */) {",
                "}",
                "finally {",
                "    console.log(\"done\");",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_bare_raise_outside_handler() {
        assert_eq!(emit(vec![Stmt::Raise { exc: None }]), "throw null;");
    }

    #[test]
    fn test_depth_balanced_after_unsupported_nested() {
        let mut translator = Translator::new();
        let stmt = Stmt::While {
            test: Expr::name("x"),
            body: vec![Stmt::if_stmt(
                Expr::name("y"),
                vec![
                    Stmt::Assign {
                        targets: vec![Expr::name("a"), Expr::name("b")],
                        value: Expr::int(1),
                    },
                    Stmt::unsupported(StmtKind::With),
                ],
                vec![Stmt::assign(
                    Expr::attribute(Expr::name("o"), "f"),
                    Expr::int(1),
                )],
            )],
            orelse: vec![],
        };
        translator.handle(&stmt);
        assert_eq!(translator.depth(), 0);
        let text = translator.lines().join("\n");
        assert_eq!(text.matches('{').count(), text.matches('}').count());
    }

    #[test]
    fn test_translate_resets_state() {
        let module = Module::new(vec![Stmt::assign(Expr::name("x"), Expr::int(1))]);
        let mut translator = Translator::new();
        assert_eq!(translator.translate(&module), "let x = 1;");
        assert_eq!(translator.translate(&module), "let x = 1;");
    }

    #[test]
    fn test_translate_discards_earlier_handled_state() {
        let mut translator = Translator::new();
        translator.handle(&Stmt::assign(Expr::name("x"), Expr::int(0)));
        let module = Module::new(vec![Stmt::assign(Expr::name("x"), Expr::int(1))]);
        assert_eq!(translator.translate(&module), "let x = 1;");
        assert_eq!(translator.depth(), 0);
    }

    #[test]
    fn test_cases_share_switch_scope() {
        let case = |value: i64| MatchCase {
            pattern: Pattern::Value(Expr::int(value)),
            guard: None,
            body: vec![Stmt::assign(Expr::name("r"), Expr::int(value))],
        };
        let stmt = Stmt::Match {
            subject: Expr::name("d"),
            cases: vec![case(1), case(2)],
        };
        assert_eq!(
            emit(vec![stmt]),
            [
                "switch (d) {",
                "    case 1:",
                "        let r = 1;",
                "        break;",
                "    case 2:",
                "        r = 2;",
                "        break;",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_branch_declarations_stay_in_their_block() {
        let stmt = Stmt::if_stmt(
            Expr::name("c"),
            vec![Stmt::assign(Expr::name("y"), Expr::int(1))],
            vec![Stmt::assign(Expr::name("y"), Expr::int(2))],
        );
        assert_eq!(
            emit(vec![stmt]),
            "if (c) {\n    let y = 1;\n}\nelse {\n    let y = 2;\n}"
        );
    }
}
