use super::Route;
use std::fmt;

pub struct HomePage;

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome to the Clinic")?;
        writeln!(f, "Your simple and reliable appointment booking solution.")?;
        writeln!(f)?;
        writeln!(f, "  Login     {}", Route::Login)?;
        writeln!(f, "  Register  {}", Route::Register)
    }
}
