//! Terminal output formatting.

use colored::Colorize;
use corpora_core::corpus::model::Corpus;
use corpora_graph::ontology::{Class, ClassSignature, Object};

/// Print corpora as a table.
pub fn print_corpora_table(corpora: &[Corpus]) {
    if corpora.is_empty() {
        println!("{}", "No corpora found.".dimmed());
        return;
    }

    println!("{:<6} {:<30} {:<16} {:>6}", "ID", "Title", "Genre", "Texts");
    println!("{}", "─".repeat(61));

    for corpus in corpora {
        println!(
            "{:<6} {:<30} {:<16} {:>6}",
            corpus.id,
            truncate(&corpus.title, 28),
            truncate(&corpus.genre, 14),
            corpus.texts.len()
        );
    }
}

/// Print a single corpus with its texts.
pub fn print_corpus(corpus: &Corpus) {
    println!("{} {}", corpus.title.cyan().bold(), format!("(#{})", corpus.id).dimmed());
    if !corpus.genre.is_empty() {
        println!("{}: {}", "Genre".bold(), corpus.genre);
    }
    if let Some(desc) = &corpus.description {
        println!();
        println!("{}", desc);
    }

    println!();
    if corpus.texts.is_empty() {
        println!("{}", "No texts.".dimmed());
        return;
    }
    println!("{}", "Texts".bold());
    for text in &corpus.texts {
        let translation = text
            .has_translation_id
            .map(|id| format!(" → #{}", id))
            .unwrap_or_default();
        println!(
            "  {} {}{}",
            format!("#{}", text.id).dimmed(),
            truncate(&text.title, 50),
            translation.yellow()
        );
    }
}

/// One line of the class tree.
pub fn print_class_line(class: &Class, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if depth == 0 { "●" } else { "└" };
    println!("{}{} {} {}", indent, marker.cyan(), class.title.bold(), class.uri.dimmed());
}

/// Print a class and its immediate neighbourhood.
pub fn print_class(class: &Class, parents: &[Class], children: &[Class], objects: &[Object]) {
    println!("{} {}", class.title.cyan().bold(), class.uri.dimmed());
    if let Some(desc) = class.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", desc);
    }
    println!();

    print_class_list("Parents", parents);
    print_class_list("Children", children);

    println!("{} ({})", "Objects".bold(), objects.len());
    for object in objects {
        println!("  {} {}", object.title, object.uri.dimmed());
    }
}

fn print_class_list(heading: &str, classes: &[Class]) {
    println!("{} ({})", heading.bold(), classes.len());
    for class in classes {
        println!("  {} {}", class.title, class.uri.dimmed());
    }
}

/// Print the attributes declared on a class.
pub fn print_signature(signature: &ClassSignature) {
    println!("{} {}", "Signature of".bold(), signature.class_uri.cyan());
    println!("{}", "─".repeat(50));

    if signature.datatype_properties.is_empty() && signature.object_properties.is_empty() {
        println!("{}", "No attributes.".dimmed());
        return;
    }

    for prop in &signature.datatype_properties {
        println!("  {} {} {}", "data".green(), prop.title, prop.uri.dimmed());
    }
    for prop in &signature.object_properties {
        let range = prop.range_class_uri.as_deref().unwrap_or("?");
        println!(
            "  {} {} → {} {}",
            "object".magenta(),
            prop.title,
            range.yellow(),
            prop.uri.dimmed()
        );
    }
}

/// Shorten to `max_chars` characters, marking the cut with "...".
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
