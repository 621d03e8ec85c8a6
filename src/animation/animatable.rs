/// Values a tween can interpolate.
pub trait Animatable: Clone + PartialEq + 'static {
    /// `t = 0` gives `from`, `t = 1` gives `to`. Eased progress may leave
    /// `[0, 1]` (back curves) and the result overshoots with it.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}
