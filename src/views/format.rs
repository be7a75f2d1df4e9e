//! Price formatting and WhatsApp contact links.

/// Group separator used by French number formatting (narrow no-break space).
pub const GROUP_SEPARATOR: char = '\u{202F}';

/// Message prefilled in the services page contact link.
pub const SERVICES_CONTACT_MESSAGE: &str = "Bonjour ! J'aimerais en savoir plus sur vos services.";

/// Formats `amount` the French way, followed by `currency`.
///
/// Thousands are grouped with [`GROUP_SEPARATOR`], decimals use a comma and
/// at most three fraction digits are kept, trailing zeros dropped.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::views::format_price;
///
/// assert_eq!(format_price(1_250_000.0, "FCFA"), "1\u{202F}250\u{202F}000 FCFA");
/// assert_eq!(format_price(9.5, "FCFA"), "9,5 FCFA");
/// ```
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    let number = format_number(amount);
    if currency.is_empty() {
        number
    } else {
        format!("{number} {currency}")
    }
}

/// Formats a number with French grouping and decimal comma.
#[must_use]
pub fn format_number(amount: f64) -> String {
    if !amount.is_finite() {
        return String::from("0");
    }

    let fixed = format!("{:.3}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let negative = amount < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}

/// Builds a `wa.me` link for `number` with a prefilled `message`.
///
/// Everything but digits is stripped from the number. An empty message
/// yields a link without a `text` parameter.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::views::whatsapp_link;
///
/// assert_eq!(
///     whatsapp_link("+237 6 99 00 11 22", "Bonjour !"),
///     "https://wa.me/237699001122?text=Bonjour%20%21"
/// );
/// ```
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if message.is_empty() {
        format!("https://wa.me/{digits}")
    } else {
        format!("https://wa.me/{digits}?text={}", urlencoding::encode(message))
    }
}

/// Message prefilled when ordering a product over WhatsApp.
#[must_use]
pub fn product_order_message(product_name: &str, price: Option<&str>) -> String {
    match price {
        Some(price) => {
            format!("Bonjour ! Je suis intéressé(e) par le produit « {product_name} » à {price}.")
        }
        None => format!("Bonjour ! Je suis intéressé(e) par le produit « {product_name} »."),
    }
}
