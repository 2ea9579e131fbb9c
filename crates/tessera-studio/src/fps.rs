/// Counts presented frames and reports a rate once per second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: f32,
}

impl FpsCounter {
    /// Call once per frame with the elapsed seconds since start.
    pub fn tick(&mut self, elapsed: f32) -> Option<f32> {
        self.frames += 1;
        let span = elapsed - self.window_start;
        if span < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / span;
        self.frames = 0;
        self.window_start = elapsed;
        Some(fps)
    }
}

pub fn window_title(demo: &str, fps: f32) -> String {
    format!("tessera · {demo} · {fps:.0} fps")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut fps = FpsCounter::default();
        for i in 1..60 {
            assert_eq!(fps.tick(i as f32 / 60.0), None);
        }
        assert_eq!(fps.tick(1.0), Some(60.0));
        assert_eq!(fps.tick(1.5), None);
        assert_eq!(fps.tick(2.0), Some(2.0));
    }

    #[test]
    fn title_rounds_rate() {
        assert_eq!(window_title("cubes", 59.6), "tessera · cubes · 60 fps");
    }
}
