//! Case conversion for table and column names.
//!
//! Letters and digits are cased with `heck`; `_`, `-`, `.` and spaces are
//! word separators. Any other character is copied through untouched and
//! splits the name into segments that are converted independently.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ')
}

fn convert_segments<F>(s: &str, mut convert: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();

    for c in s.chars() {
        if is_word_char(c) {
            word.push(c);
        } else {
            if !word.is_empty() {
                out.push_str(&convert(&word));
                word.clear();
            }
            out.push(c);
        }
    }
    if !word.is_empty() {
        out.push_str(&convert(&word));
    }

    out
}

/// `user_profile` -> `UserProfile`
pub fn to_camel(s: &str) -> String {
    convert_segments(s, |word| word.to_upper_camel_case())
}

/// `user_profile` -> `userProfile`
pub fn to_camel_lower(s: &str) -> String {
    let mut first = true;

    convert_segments(s, |word| {
        if first {
            first = false;
            word.to_lower_camel_case()
        } else {
            word.to_upper_camel_case()
        }
    })
}

/// `UserProfile` -> `user_profile`
pub fn to_snake(s: &str) -> String {
    convert_segments(s, |word| word.to_snake_case())
}

/// Removes every configured prefix at most once, in the given order.
pub fn strip_prefix<S: AsRef<str>>(s: &str, prefixes: &[S]) -> String {
    prefixes.iter().fold(s.to_string(), |name, prefix| {
        let prefix = prefix.as_ref();
        if !prefix.is_empty() && name.starts_with(prefix) {
            name[prefix.len()..].to_string()
        } else {
            name
        }
    })
}

/// Trims the characters that must not lead or trail a generated file name.
pub fn file_name(s: &str) -> String {
    s.trim_matches(|c: char| matches!(c, '-' | '_' | '.'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_variants() {
        assert_eq!(to_camel("user_profile"), "UserProfile");
        assert_eq!(to_camel("user-profile.v2"), "UserProfileV2");
        assert_eq!(to_camel_lower("user_profile"), "userProfile");
        assert_eq!(to_camel_lower("id"), "id");
        assert_eq!(to_snake("UserProfile"), "user_profile");
        assert_eq!(to_snake("userProfile"), "user_profile");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_camel(""), "");
        assert_eq!(to_camel_lower(""), "");
        assert_eq!(to_snake(""), "");
        assert_eq!(strip_prefix("", &["t_"]), "");
        assert_eq!(file_name(""), "");
    }

    #[test]
    fn other_characters_pass_through() {
        assert_eq!(to_camel("user$name"), "User$Name");
        assert_eq!(to_camel_lower("user$name"), "user$Name");
        assert_eq!(to_snake("User$Name"), "user$name");
    }

    #[test]
    fn case_round_trip_is_stable() {
        for s in ["user", "user_profile", "a_1", "order_item_v2", "x", "created_at", "abc123_def"] {
            let camel = to_camel(s);
            assert_eq!(to_camel(&to_snake(&camel)), camel, "round trip of {}", s);
        }
    }

    #[test]
    fn prefixes_are_stripped_once_in_order() {
        assert_eq!(strip_prefix("t_sys_user", &["t_", "sys_"]), "user");
        assert_eq!(strip_prefix("t_t_user", &["t_"]), "t_user");
        assert_eq!(strip_prefix("user", &["t_"]), "user");
        assert_eq!(strip_prefix("user", &[""]), "user");
        assert_eq!(strip_prefix::<&str>("user", &[]), "user");
    }

    #[test]
    fn file_name_trims_separators() {
        assert_eq!(file_name("-_user_profile._"), "user_profile");
        assert_eq!(file_name("user"), "user");
    }
}
