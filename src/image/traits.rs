pub trait Raster {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { raster: self, y: 0 }
    }

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

pub struct Rows<'a, R: ?Sized + Raster> {
    raster: &'a R,
    y: usize,
}

impl<'a, R: Raster> Iterator for Rows<'a, R> {
    type Item = &'a [R::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.raster.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.raster.row(y))
    }
}
