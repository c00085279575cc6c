//! Script tree and printer.

use crate::error::DslError;
use crate::expr::Expr;
use crate::INDENT;

/// A statement inside a script or block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `target = value`
    Assign { target: String, value: Expr },
    /// A bare call statement, e.g. `id("com.android.application")`
    Call(Expr),
    /// A nested block
    Block(Block),
    /// `import a.b.C`
    Import(String),
    /// `// text`
    Comment(String),
    /// Empty line
    Blank,
}

/// A named block with optional call arguments: `name(args) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub args: Vec<Expr>,
    pub body: Vec<Node>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Block opened by a call, e.g. `tasks.register<Delete>("clean") { ... }`
    pub fn with_args(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            body: Vec::new(),
        }
    }

    pub fn assign(mut self, target: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.body.push(Node::Assign {
            target: target.into(),
            value: value.into(),
        });
        self
    }

    pub fn call(mut self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        self.body.push(Node::Call(Expr::call(name, args)));
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.body.push(Node::Block(block));
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.body.push(Node::Comment(text.into()));
        self
    }

    pub fn push(&mut self, node: Node) {
        self.body.push(node);
    }

    fn validate(&self) -> Result<(), DslError> {
        validate_identifier(&self.name)?;
        for arg in &self.args {
            for name in arg.call_names() {
                validate_identifier(name)?;
            }
        }
        for node in &self.body {
            node.validate()?;
        }
        Ok(())
    }

    fn write(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        out.push_str(&self.name);
        if !self.args.is_empty() {
            out.push('(');
            let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
            out.push_str(&args.join(", "));
            out.push(')');
        }
        if self.body.is_empty() {
            out.push_str(" {}\n");
            return;
        }
        out.push_str(" {\n");
        for node in &self.body {
            node.write(out, depth + 1);
        }
        indent(out, depth);
        out.push_str("}\n");
    }
}

impl Node {
    fn validate(&self) -> Result<(), DslError> {
        match self {
            Node::Assign { target, value } => {
                validate_identifier(target)?;
                for name in value.call_names() {
                    validate_identifier(name)?;
                }
                Ok(())
            }
            Node::Call(expr) => {
                for name in expr.call_names() {
                    validate_identifier(name)?;
                }
                Ok(())
            }
            Node::Block(block) => block.validate(),
            Node::Import(path) => validate_identifier(path),
            Node::Comment(text) => {
                if text.contains('\n') {
                    Err(DslError::MultilineComment(text.clone()))
                } else {
                    Ok(())
                }
            }
            Node::Blank => Ok(()),
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Node::Assign { target, value } => {
                indent(out, depth);
                out.push_str(&format!("{} = {}\n", target, value));
            }
            Node::Call(expr) => {
                indent(out, depth);
                out.push_str(&format!("{}\n", expr));
            }
            Node::Block(block) => block.write(out, depth),
            Node::Import(path) => {
                indent(out, depth);
                out.push_str(&format!("import {}\n", path));
            }
            Node::Comment(text) => {
                indent(out, depth);
                out.push_str(&format!("// {}\n", text));
            }
            Node::Blank => out.push('\n'),
        }
    }
}

/// A whole `build.gradle.kts` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    nodes: Vec<Node>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Append a top-level block, separated from the previous one by a blank line
    pub fn block(&mut self, block: Block) -> &mut Self {
        if !self.nodes.is_empty() {
            self.nodes.push(Node::Blank);
        }
        self.nodes.push(Node::Block(block));
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Validate identifiers and print the script
    pub fn render(&self) -> Result<String, DslError> {
        for node in &self.nodes {
            node.validate()?;
        }
        let mut out = String::new();
        for node in &self.nodes {
            node.write(&mut out, 0);
        }
        Ok(out)
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Check a dotted Kotlin path such as `tasks.withType<KotlinCompile>().configureEach`.
///
/// Each segment is an identifier, optionally followed by one generic argument
/// and an empty argument list.
fn validate_identifier(path: &str) -> Result<(), DslError> {
    let invalid = || DslError::InvalidIdentifier(path.to_string());
    if path.is_empty() {
        return Err(invalid());
    }
    for segment in path.split('.') {
        let segment = segment.strip_suffix("()").unwrap_or(segment);
        let (head, generic) = match segment.find('<') {
            Some(pos) => {
                let generic = segment[pos + 1..].strip_suffix('>').ok_or_else(invalid)?;
                (&segment[..pos], Some(generic))
            }
            None => (segment, None),
        };
        if !is_ident(head) {
            return Err(invalid());
        }
        if let Some(generic) = generic {
            if !is_ident(generic) {
                return Err(invalid());
            }
        }
    }
    Ok(())
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
