use maud::{html, Markup};

pub mod card;

pub use card::card;

/// "$89,500" style amount; `suffix` for rents ("/mo").
pub fn money(amount: i64, suffix: &str) -> Markup {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };

    html! {
        span class="price" { (sign) "$" (grouped) (suffix) }
    }
}
