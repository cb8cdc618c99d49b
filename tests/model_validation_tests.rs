use oshop_backoffice::models::{
    CategoryForm, FooterEntryForm, LoginForm, ManageCategoryForm, ProductForm, UserForm,
};

// --- Helpers ---

fn valid_user_form() -> UserForm {
    UserForm {
        email: "ada@oshop.local".to_string(),
        password: "p@ssword".to_string(),
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        role: "catalog-manager".to_string(),
        status: "1".to_string(),
    }
}

fn valid_product_form() -> ProductForm {
    ProductForm {
        name: "Derby".to_string(),
        description: "Leather shoe".to_string(),
        picture: "assets/images/derby.jpg".to_string(),
        price: "59.90".to_string(),
        rate: "4".to_string(),
        status: "1".to_string(),
        brand_id: "1".to_string(),
        category_id: "2".to_string(),
        type_id: "3".to_string(),
    }
}

// --- Tests ---

#[test]
fn test_login_form_requires_both_fields() {
    let errors = LoginForm::default().validate();
    assert_eq!(errors, vec!["Please enter an email", "Please enter a password"]);

    let form = LoginForm {
        email: "ada@oshop.local".to_string(),
        password: "secret".to_string(),
    };
    assert!(form.validate().is_empty());
}

#[test]
fn test_category_form_trims_and_defaults_home_order() {
    let form = CategoryForm {
        name: "  Shoes ".to_string(),
        subtitle: "For walking".to_string(),
        picture: "shoes.png".to_string(),
        home_order: String::new(),
    };

    let input = form.validate().expect("valid category");
    assert_eq!(input.name, "Shoes");
    assert_eq!(input.home_order, 0);
}

#[test]
fn test_category_form_collects_every_error() {
    let form = CategoryForm {
        home_order: "first".to_string(),
        ..Default::default()
    };

    let errors = form.validate().expect_err("invalid category");
    assert_eq!(
        errors,
        vec![
            "You must enter a name",
            "You must enter a subtitle",
            "You must enter a picture URL",
            "The home order must be a whole number",
        ]
    );
}

#[test]
fn test_product_form_parses_numbers() {
    let input = valid_product_form().validate().expect("valid product");
    assert!((input.price - 59.90).abs() < f64::EPSILON);
    assert_eq!(input.rate, 4);
    assert_eq!((input.brand_id, input.category_id, input.type_id), (1, 2, 3));
}

#[test]
fn test_product_form_rejects_malformed_numbers() {
    let form = ProductForm {
        price: "-3".to_string(),
        rate: "five".to_string(),
        brand_id: String::new(),
        category_id: "x".to_string(),
        ..valid_product_form()
    };

    let errors = form.validate().expect_err("invalid product");
    assert!(errors.contains(&"The price must be a positive number".to_string()));
    assert!(errors.contains(&"The rate must be a whole number".to_string()));
    assert!(errors.contains(&"You must choose a brand".to_string()));
    assert!(errors.contains(&"You must choose a category".to_string()));
    assert!(!errors.contains(&"You must choose a type".to_string()));
}

#[test]
fn test_footer_entry_form() {
    let input = FooterEntryForm::from_parts("Nike", 3)
        .validate()
        .expect("valid entry");
    assert_eq!(input.name, "Nike");
    assert_eq!(input.footer_order, 3);

    let errors = FooterEntryForm::default()
        .validate()
        .expect_err("name missing");
    assert_eq!(errors, vec!["You must enter a name"]);
}

#[test]
fn test_user_form_accepts_a_complete_account() {
    let draft = valid_user_form().validate().expect("valid user");
    assert_eq!(draft.email, "ada@oshop.local");
    assert_eq!(draft.status, 1);

    let input = draft.into_input("hashed".to_string());
    assert_eq!(input.password_hash, "hashed");
    assert_eq!(input.role, "catalog-manager");
}

#[test]
fn test_user_form_password_must_contain_an_at_sign() {
    let form = UserForm {
        password: "password".to_string(),
        ..valid_user_form()
    };
    assert_eq!(
        form.validate().expect_err("weak password"),
        vec!["The password must contain an @"]
    );
}

#[test]
fn test_user_form_checks_email_shape_and_role() {
    let form = UserForm {
        email: "not-an-email".to_string(),
        role: "superuser".to_string(),
        ..valid_user_form()
    };
    assert_eq!(
        form.validate().expect_err("invalid user"),
        vec!["You must enter a valid email", "Unknown role"]
    );

    for email in ["a@b", "@oshop.local", "a b@oshop.local", "a@@oshop.local"] {
        let form = UserForm {
            email: email.to_string(),
            ..valid_user_form()
        };
        assert!(form.validate().is_err(), "email {email}");
    }
}

#[test]
fn test_user_form_requires_everything() {
    let errors = UserForm::default().validate().expect_err("empty form");
    assert_eq!(
        errors,
        vec![
            "You must enter an email",
            "You must enter a password",
            "You must enter a first name",
            "You must enter a last name",
            "You must choose a role",
            "You must choose a status",
        ]
    );
}

#[test]
fn test_manage_form_numbers_slots_from_one_and_skips_empty_ones() {
    let form = ManageCategoryForm {
        slot1: "4".to_string(),
        slot3: "2".to_string(),
        ..Default::default()
    };

    assert_eq!(form.validate(), Ok(vec![(4, 1), (2, 3)]));
    assert_eq!(ManageCategoryForm::default().validate(), Ok(vec![]));
}

#[test]
fn test_manage_form_rejects_duplicates_and_garbage() {
    let form = ManageCategoryForm {
        slot1: "4".to_string(),
        slot2: "4".to_string(),
        slot5: "abc".to_string(),
        ..Default::default()
    };

    assert_eq!(
        form.validate(),
        Err(vec![
            "Each home slot must hold a different category".to_string(),
            "Slot 5 holds an invalid category".to_string(),
        ])
    );
}
