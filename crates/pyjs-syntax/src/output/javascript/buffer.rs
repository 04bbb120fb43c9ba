//! Line-oriented output accumulator.

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Ordered output lines plus the current indentation depth.
///
/// Lines are indented when pushed, so changing the depth never rewrites
/// earlier output.
#[derive(Debug, Default)]
pub struct EmissionBuffer {
    lines: Vec<String>,
    depth: usize,
}

impl EmissionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current depth.
    pub fn push(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        let mut out = String::with_capacity(INDENT.len() * self.depth + line.len());
        for _ in 0..self.depth {
            out.push_str(INDENT);
        }
        out.push_str(line);
        self.lines.push(out);
    }

    /// Run `f` one level deeper, restoring the depth afterwards.
    pub fn indented<T, R>(target: &mut T, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: AsMut<EmissionBuffer>,
    {
        target.as_mut().depth += 1;
        let result = f(target);
        target.as_mut().depth -= 1;
        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.depth = 0;
    }

    /// Join the lines with newlines, without a trailing newline.
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

impl AsMut<EmissionBuffer> for EmissionBuffer {
    fn as_mut(&mut self) -> &mut EmissionBuffer {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_indents_by_depth() {
        let mut buffer = EmissionBuffer::new();
        buffer.push("a {");
        EmissionBuffer::indented(&mut buffer, |b| {
            b.push("b;");
            EmissionBuffer::indented(b, |b| b.push("c;"));
        });
        buffer.push("}");
        assert_eq!(buffer.join(), "a {\n    b;\n        c;\n}");
        assert_eq!(buffer.depth(), 0);
    }

    #[test]
    fn test_clear_resets_depth() {
        let mut buffer = EmissionBuffer::new();
        buffer.depth = 3;
        buffer.push("x");
        buffer.clear();
        assert!(buffer.lines().is_empty());
        assert_eq!(buffer.depth(), 0);
    }
}
