pub mod click;
