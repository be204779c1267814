pub mod add_to_cart_button;
pub mod cart_lines;
pub mod checkout_form;
