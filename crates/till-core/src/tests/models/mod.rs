mod logo_ref;
mod profile;
mod role;
