//! `CREATE FUNCTION` declaration rendered as styled markup.
//!
//! Multi-line layout is made of literal newlines and tabs, so the output
//! must be shown inside a whitespace-preserving cell.

use super::escape;
use crate::model::{Argument, Procedure};

/// Whitespace used between and within arguments.
struct Layout {
    open: &'static str,
    separator: &'static str,
    spacer: &'static str,
}

const COMPACT: Layout = Layout {
    open: " ( ",
    separator: ", ",
    spacer: " ",
};

const MULTILINE: Layout = Layout {
    open: "\n\t( ",
    separator: ",\n\t  ",
    spacer: "\t",
};

impl Layout {
    /// More than one argument goes one per line.
    fn for_arity(arity: usize) -> &'static Layout {
        if arity > 1 {
            &MULTILINE
        } else {
            &COMPACT
        }
    }
}

fn keyword(text: &str) -> String {
    format!("<span class=\"tK\">{text}</span>")
}

fn identifier(text: &str) -> String {
    format!("<span class=\"tI\">{}</span>", escape(text))
}

fn datatype(text: &str) -> String {
    format!("<span class=\"tD\">{}</span>", escape(text))
}

fn argument(arg: &Argument, spacer: &str) -> String {
    let mut out = String::new();
    if let Some(mode) = arg.mode() {
        out.push_str(&keyword(mode.keyword()));
        out.push_str(spacer);
    }
    out.push_str(&identifier(&arg.name));
    out.push_str(spacer);
    out.push_str(&datatype(&arg.arg_type));
    out
}

/// Render the procedure's declaration.
#[must_use]
pub fn render(procedure: &Procedure) -> String {
    let layout = Layout::for_arity(procedure.arguments.len());

    let mut out = format!(
        "{} <b>{}</b>{}",
        keyword("CREATE FUNCTION"),
        identifier(&procedure.name),
        layout.open
    );

    let arguments: Vec<String> = procedure
        .arguments
        .iter()
        .map(|a| argument(a, layout.spacer))
        .collect();
    out.push_str(&arguments.join(layout.separator));
    out.push_str(" )");

    if procedure.secdef {
        out.push('\n');
        out.push_str(&keyword("SECURITY DEFINER"));
    }
    if procedure.strict {
        out.push('\n');
        out.push_str(&keyword("STRICT"));
    }

    let returns = if procedure.setof {
        "RETURNS SETOF"
    } else {
        "RETURNS"
    };
    out.push('\n');
    out.push_str(&keyword(returns));
    out.push(' ');
    out.push_str(&datatype(&procedure.rettype));

    out
}
