pub mod playcricket;
