pub trait ToMatchKey {
    /// Lowercased copy with every non-alphanumeric run collapsed to a single
    /// space and the ends trimmed. `"Chill  Vibes!"` becomes `"chill vibes"`.
    fn to_match_key(&self) -> String;
}

impl ToMatchKey for str {
    fn to_match_key(&self) -> String {
        let mut out = String::with_capacity(self.len());
        let mut pending_space = false;
        for ch in self.chars().flat_map(char::to_lowercase) {
            if ch.is_alphanumeric() {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(ch);
            } else {
                pending_space = true;
            }
        }
        out
    }
}

impl ToMatchKey for String {
    fn to_match_key(&self) -> String {
        self.as_str().to_match_key()
    }
}
