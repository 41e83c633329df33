use linecode_core::{
    BalanceProfile, ConversionResult, Level, LevelHistogram, Scheme, Step, ValidInput,
};

fn format_signal(signal: &[Level]) -> String {
    let items: Vec<String> = signal.iter().map(|l| l.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn print_step(index: usize, step: &Step) {
    println!("\n{:>2}. {}", index + 1, step.title);
    for line in &step.content {
        println!("    › {}", line);
    }
    if let Some(balance) = &step.balance {
        let flag = if balance.is_violation {
            " (DC Balance Violation)"
        } else {
            ""
        };
        println!("    Running Sum: {}{}", balance.sum, flag);
        if let Some(correction) = &balance.correction {
            println!("    Balance Correction: {}", correction);
        }
    }
    if let Some(data) = &step.data {
        println!("    Signal at this step: {}", format_signal(data));
    }
}

pub fn print_result(result: &ConversionResult, input: &ValidInput, show_trace: bool) {
    if result.is_empty() {
        println!("Empty input: nothing to encode");
        return;
    }

    println!(
        "🔌 {} encoding of {} bits ({} symbols)",
        result.scheme,
        input.bits().len(),
        input.symbol_count()
    );

    if show_trace {
        println!("\n📋 Step-by-Step Conversion");
        for (i, step) in result.steps.iter().enumerate() {
            print_step(i, step);
        }
        println!();
    }

    println!("Output signal: {}", format_signal(&result.signal));
}

pub fn print_profile(profile: &BalanceProfile, signal: &[Level]) {
    let histogram = LevelHistogram::compute(signal);

    println!("\n📊 DC Balance Profile");
    println!("  • Running sum: {}", format_signal_i32(&profile.running_sum));
    println!("  • Final sum: {}", profile.final_sum);
    println!("  • Peak excursion: {}", profile.peak_excursion);
    match profile.first_violation {
        Some(first) => println!(
            "  • Samples beyond ±3: {} (first at index {})",
            profile.violations, first
        ),
        None => println!("  • Samples beyond ±3: 0"),
    }
    let counts: Vec<String> = histogram
        .counts
        .iter()
        .map(|(level, n)| format!("{}: {}", level, n))
        .collect();
    println!("  • Level counts: {}", counts.join(", "));
}

fn format_signal_i32(values: &[i32]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn print_schemes() {
    for scheme in Scheme::all() {
        let info = scheme.info();
        println!("{} - {}", info.name, info.full_name);
        println!("  {}", info.description);
        println!(
            "  Input: {} bits/symbol, output: {} sample(s)/symbol, alphabet {:?}",
            scheme.bits_per_symbol(),
            scheme.outputs_per_symbol(),
            info.alphabet
        );
        for c in info.characteristics {
            println!("  • {}", c);
        }
        println!("  Used in: {}\n", info.usage);
    }
}
