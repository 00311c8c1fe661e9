mod goods;
mod helpers;
mod login;
mod signup;
