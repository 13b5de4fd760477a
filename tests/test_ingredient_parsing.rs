use recipe_planner::parse_ingredient;

#[test]
fn test_leading_amount_and_unit_are_extracted() {
    let amounts = [
        ("3", 3.0),
        ("0.25", 0.25),
        ("3/4", 0.75),
        ("2 1/2", 2.5),
        ("1-1/3", 1.0 + 1.0 / 3.0),
        ("¼", 0.25),
    ];
    let units = [
        ("tablespoons", "tbsp"),
        ("Tbsp", "tbsp"),
        ("teaspoon", "tsp"),
        ("cups", "cup"),
        ("ounces", "oz"),
        ("lb", "pound"),
        ("grams", "g"),
        ("kg", "kg"),
    ];

    for (amount, expected_quantity) in amounts {
        for (unit, canonical) in units {
            let line = format!("{} {} chopped walnuts", amount, unit);
            let parsed = parse_ingredient(&line);

            let quantity = parsed.quantity.unwrap_or_else(|| panic!("no quantity in '{}'", line));
            assert!(
                (quantity - expected_quantity).abs() < 1e-12,
                "'{}' parsed as {}",
                line,
                quantity
            );
            assert_eq!(parsed.unit.as_deref(), Some(canonical), "line '{}'", line);
            assert_eq!(parsed.name, "chopped walnuts", "line '{}'", line);
        }
    }
}

#[test]
fn test_real_world_lines() {
    let cases: &[(&str, Option<f64>, Option<&str>, &str)] = &[
        ("1 1/2 cups plain flour", Some(1.5), Some("cup"), "plain flour"),
        ("a pinch of salt", None, None, "a pinch of salt"),
        ("2 cloves garlic, minced", Some(2.0), Some("clove"), "garlic, minced"),
        ("1 (14.5 ounce) can diced tomatoes", Some(1.0), Some("can"), "diced tomatoes"),
        ("Fresh basil leaves", None, None, "Fresh basil leaves"),
        ("4 ripe tomatoes", Some(4.0), None, "ripe tomatoes"),
        ("500g minced beef", Some(500.0), Some("g"), "minced beef"),
        ("1/3 cup of grated parmesan", Some(1.0 / 3.0), Some("cup"), "grated parmesan"),
        ("Cloves", None, None, "Cloves"),
        ("cloves, to garnish", None, None, "cloves, to garnish"),
    ];

    for (line, quantity, unit, name) in cases {
        let parsed = parse_ingredient(line);
        assert_eq!(parsed.quantity, *quantity, "line '{}'", line);
        assert_eq!(parsed.unit.as_deref(), *unit, "line '{}'", line);
        assert_eq!(parsed.name, *name, "line '{}'", line);
    }
}
