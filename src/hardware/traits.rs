/// Status LED. Writes are best effort; implementations log their own errors.
pub trait Led {
    fn on(&mut self);
    fn off(&mut self);
    fn is_on(&self) -> bool;
}

pub trait Button {
    /// Current line level, already translated to pressed/released.
    fn is_pressed(&self) -> bool;
}
