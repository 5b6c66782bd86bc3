//! Basic usage of the proofmark core

use proofmark_core::{
    align, render_display, render_document, AlignConfig, AlignmentEngine, Policy, PolicyKind,
    Proofreader,
};

const LINE: &str = "----------------------------------------";

fn main() {
    println!("=== Proofmark Examples ===\n");

    // Example 1: Spans of a single insertion
    example_alignment();

    // Example 2: The same revision under every policy
    example_policies();

    // Example 3: Split replacements
    example_split_replacements();
}

fn example_alignment() {
    println!("Example 1: Alignment");
    println!("{}", LINE);

    let original = "我昨天去公司";
    let revised = "我昨天去了公司";

    for (i, span) in align(original, revised).iter().enumerate() {
        println!("  {}. {}", i + 1, span.description(original, revised));
    }
    println!("\n");
}

fn example_policies() {
    println!("Example 2: Policies");
    println!("{}", LINE);

    let original = "他很高心，我们们明天见。";
    let revised = "他很高兴，我们明天见！";
    let spans = align(original, revised);

    for kind in PolicyKind::ALL {
        let policy = Policy::from_kind(kind);
        println!("[{}] {}", policy.label, policy.hint);
        println!("  display:  {}", render_display(&spans, original, revised, &policy));
        for run in render_document(&spans, original, revised, &policy) {
            println!(
                "  run: {:?} color={:?} strike={} bold={}",
                run.text, run.color, run.strike_through, run.bold
            );
        }
    }
    println!("\n");
}

fn example_split_replacements() {
    println!("Example 3: Split Replacements");
    println!("{}", LINE);

    let original = "他很高心";
    let revised = "他很高兴";

    let engine = AlignmentEngine::new(AlignConfig::split_replacements());
    for span in engine.align(original, revised) {
        println!("  {}", span.description(original, revised));
    }

    let result = Proofreader::new(AlignConfig::split_replacements()).review(
        original,
        revised,
        &Policy::from_kind(PolicyKind::Fix),
    );
    println!("  {}", result.statistics());
    println!("\n");
}
