use rand::Rng;

const INVOICE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate an invoice number: `#` followed by 5 characters from `[A-Z0-9]`
pub fn invoice_number() -> String {
    invoice_number_with(&mut rand::thread_rng())
}

/// Same as [`invoice_number`] with a caller-supplied RNG (seeded in tests)
pub fn invoice_number_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut out = String::with_capacity(6);
    out.push('#');
    out.push_str(&random_string(rng, INVOICE_ALPHABET, 5));
    out
}

/// Short URL-safe identifier for order items (8 chars)
pub fn item_id() -> String {
    random_string(&mut rand::thread_rng(), ID_ALPHABET, 8)
}

fn random_string<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}
