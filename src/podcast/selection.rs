use serde_json::Value;

use super::{PodcastOption, OPTION_COUNT};
use crate::error::AppError;

pub const MISSING_SELECTION_KEYS: &str = "selected_index and options are required";

/// A validated choice out of a client-echoed option list.
#[derive(Debug, Clone)]
pub struct Selection {
    pub index: usize,
    pub options: Vec<PodcastOption>,
}

impl Selection {
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let field = |key: &str| body.get(key).filter(|v| !v.is_null());

        let (Some(index), Some(options)) = (field("selected_index"), field("options")) else {
            return Err(AppError::MissingFields(MISSING_SELECTION_KEYS.into()));
        };

        let items = options.as_array().ok_or(AppError::InvalidSelection)?;
        if items.is_empty() {
            return Err(AppError::InvalidSelection);
        }

        let options = items
            .iter()
            .map(|item| serde_json::from_value::<PodcastOption>(item.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AppError::InvalidSelection)?;

        let index = index
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < OPTION_COUNT.min(options.len()))
            .ok_or(AppError::InvalidSelection)?;

        Ok(Self { index, options })
    }

    pub fn chosen(&self) -> &PodcastOption {
        &self.options[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::tests::sample_options;
    use serde_json::json;

    #[test]
    fn picks_requested_option() {
        let body = json!({ "selected_index": 2, "options": sample_options() });
        let selection = Selection::from_json(&body).unwrap();
        assert_eq!(selection.chosen().title, "Episode 2");
    }

    #[test]
    fn missing_keys() {
        for body in [
            json!({ "options": sample_options() }),
            json!({ "selected_index": 0 }),
            json!({ "selected_index": null, "options": sample_options() }),
        ] {
            let err = Selection::from_json(&body).unwrap_err();
            assert_eq!(err.to_string(), MISSING_SELECTION_KEYS);
        }
    }

    #[test]
    fn index_outside_list_is_invalid() {
        for index in [json!(3), json!(-1), json!(1.5), json!("0")] {
            let body = json!({ "selected_index": index, "options": sample_options() });
            assert!(matches!(
                Selection::from_json(&body),
                Err(AppError::InvalidSelection)
            ));
        }
    }

    #[test]
    fn index_bounded_by_supplied_length() {
        let all = sample_options();
        let options = &all[..1];
        let body = json!({ "selected_index": 1, "options": options });
        assert!(matches!(
            Selection::from_json(&body),
            Err(AppError::InvalidSelection)
        ));

        let body = json!({ "selected_index": 0, "options": options });
        assert!(Selection::from_json(&body).is_ok());
    }

    #[test]
    fn options_must_be_a_list_of_well_formed_options() {
        for options in [
            json!("not a list"),
            json!({ "0": "a" }),
            json!([]),
            json!([{ "title": "only a title" }]),
        ] {
            let body = json!({ "selected_index": 0, "options": options });
            assert!(matches!(
                Selection::from_json(&body),
                Err(AppError::InvalidSelection)
            ));
        }
    }

    #[test]
    fn longer_list_still_limits_index_to_generated_count() {
        let mut options = sample_options();
        options.push(options[0].clone());

        let body = json!({ "selected_index": 3, "options": options });
        assert!(matches!(
            Selection::from_json(&body),
            Err(AppError::InvalidSelection)
        ));

        let body = json!({ "selected_index": 0, "options": options });
        let selection = Selection::from_json(&body).unwrap();
        assert_eq!(selection.chosen().title, "Episode 0");
        assert_eq!(selection.options.len(), 4);
    }
}
