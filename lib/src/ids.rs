use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of generated bookmark ids
pub const ID_LEN: usize = 9;

/// Random lowercase base-36 token. Not cryptographic; collisions are
/// handled by [`generate_unique_id`].
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generate an id that `taken` reports as unused
pub fn generate_unique_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut rng = rand::rng();
    loop {
        let id = generate_id(&mut rng);
        if !taken(&id) {
            return id;
        }
        log::debug!("Generated id {} collides, retrying", id);
    }
}
