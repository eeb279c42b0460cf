//! C debug-print function synthesis.
//!
//! For `typedef struct { int x; char *name; } Point;` the default output is:
//!
//! ```c
//! #include <stdio.h>
//!
//! char *debug_print_Point(const Point *value) {
//!     static char buf[1024];
//!     snprintf(buf, sizeof buf, "Point { .x = %d, .name = %s }", value->x, value->name);
//!     return buf;
//! }
//! ```

use crate::classify::FormatFamily;
use crate::parser::StructureDescriptor;

pub const DEFAULT_FN_PREFIX: &str = "debug_print_";
pub const DEFAULT_STATIC_CAPACITY: usize = 1024;

/// Where the formatted text lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferStrategy {
    /// Function-local static buffer of the given size; output is truncated to
    /// fit and overwritten by the next call.
    Static(usize),
    /// Exactly-sized `malloc` allocation the caller must `free`.
    Heap,
}

impl Default for BufferStrategy {
    fn default() -> Self {
        Self::Static(DEFAULT_STATIC_CAPACITY)
    }
}

/// Configuration for debug-print emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Prepended to the structure name to form the function name
    pub(crate) fn_prefix: String,
    pub(crate) buffer: BufferStrategy,
    /// Emit the `#include`s the function body needs
    pub(crate) emit_includes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fn_prefix: DEFAULT_FN_PREFIX.to_string(),
            buffer: BufferStrategy::default(),
            emit_includes: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fn_prefix(mut self, value: impl Into<String>) -> Self {
        self.fn_prefix = value.into();
        self
    }

    pub fn buffer(mut self, value: BufferStrategy) -> Self {
        self.buffer = value;
        self
    }

    pub fn emit_includes(mut self, value: bool) -> Self {
        self.emit_includes = value;
        self
    }

    pub fn function_name(&self, struct_name: &str) -> String {
        format!("{}{}", self.fn_prefix, struct_name)
    }
}

/// `Name { .a = %d, .b = %s }`, or `Name { }` without fields.
pub fn format_string(descriptor: &StructureDescriptor) -> String {
    let mut out = format!("{} {{", descriptor.name);
    for (i, field) in descriptor.fields.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        let spec = field.family.specifier().unwrap_or_default();
        out.push_str(&format!(" .{} = {}", field.name, spec));
    }
    out.push_str(" }");
    out
}

/// Member accesses in declaration order; pointers are cast for `%p`.
pub fn arguments(descriptor: &StructureDescriptor) -> Vec<String> {
    descriptor
        .fields
        .iter()
        .map(|field| match field.family {
            FormatFamily::Pointer => format!("(void *)value->{}", field.name),
            _ => format!("value->{}", field.name),
        })
        .collect()
}

/// Renders the text inserted right after the declaration's `;`.
pub fn render(descriptor: &StructureDescriptor, config: &Config) -> String {
    let mut out = String::from("\n\n");

    if config.emit_includes {
        out.push_str("#include <stdio.h>\n");
        if config.buffer == BufferStrategy::Heap {
            out.push_str("#include <stdlib.h>\n");
        }
        out.push('\n');
    }

    let call_tail = call_tail(descriptor);
    out.push_str(&format!(
        "char *{}(const {} *value) {{\n",
        config.function_name(&descriptor.name),
        descriptor.name
    ));

    match config.buffer {
        BufferStrategy::Static(capacity) => {
            out.push_str(&format!("    static char buf[{capacity}];\n"));
            out.push_str(&format!("    snprintf(buf, sizeof buf, {call_tail});\n"));
        }
        BufferStrategy::Heap => {
            out.push_str(&format!("    int len = snprintf(NULL, 0, {call_tail});\n"));
            out.push_str("    if (len < 0) return NULL;\n");
            out.push_str("    char *buf = malloc((size_t)len + 1);\n");
            out.push_str("    if (buf == NULL) return NULL;\n");
            out.push_str(&format!("    snprintf(buf, (size_t)len + 1, {call_tail});\n"));
        }
    }

    out.push_str("    return buf;\n}");
    out
}

/// Format literal plus arguments: `"Point { .x = %d }", value->x`.
fn call_tail(descriptor: &StructureDescriptor) -> String {
    let mut tail = format!("\"{}\"", format_string(descriptor));
    for arg in arguments(descriptor) {
        tail.push_str(", ");
        tail.push_str(&arg);
    }
    tail
}
