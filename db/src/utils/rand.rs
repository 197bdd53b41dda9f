use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

pub fn random_alpha_string(len: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(len).collect()
}

#[test]
fn generates_requested_length() {
    assert_eq!(random_alpha_string(9).len(), 9);
    assert_ne!(random_alpha_string(16), random_alpha_string(16));
}
