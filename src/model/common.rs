use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().simple().to_string()
}

/// Render a currency amount with two decimal places, the way the list view
/// and the edit field both show it.
pub fn format_cost(cost: f64) -> String {
    format!("{:.2}", cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_format_cost_rounds_to_cents() {
        assert_eq!(format_cost(5.0), "5.00");
        assert_eq!(format_cost(3.456), "3.46");
        assert_eq!(format_cost(0.1), "0.10");
    }
}
